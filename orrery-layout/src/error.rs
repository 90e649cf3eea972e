#[derive(Debug, PartialEq, thiserror::Error)]
pub enum OrreryLayoutError {
    #[error("Layout requires at least one item")]
    EmptyLayout,

    #[error("Interval bounds must be ascending: ({min}, {max})")]
    IntervalNotAscending { min: f32, max: f32 },
}
