use orrery_layout::error::OrreryLayoutError;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum OrreryResultsError {
    #[error("Improper number of options: {0}, expected between 2 and 4")]
    ImproperOptionCount(usize),

    #[error(transparent)]
    Layout(#[from] OrreryLayoutError),
}
