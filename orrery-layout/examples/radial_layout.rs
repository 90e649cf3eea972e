use orrery_layout::RadialLayout;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Radial Layout Example ===\n");

    // Place four markers around the default center with the default ranges
    let layout = RadialLayout::try_new(4)?;

    println!(
        "Ring around center {} (sizes {:?}, distances {:?}):",
        layout.get_center_offset(),
        layout.get_size_range(),
        layout.get_distance_range()
    );
    for (i, placement) in layout.compute().iter().enumerate() {
        println!(
            "  marker {} → size {:.2}, top {:.2}, left {:.2}",
            i, placement.size, placement.top, placement.left
        );
    }

    println!("\n=== Custom Ranges ===");

    // Larger markers pushed further out from a wider container
    let layout = RadialLayout::try_new(3)?
        .size_range((7.0, 9.0))?
        .distance_range((10.0, 12.0))?
        .center_offset(16.0);

    for (i, placement) in layout.compute().iter().enumerate() {
        println!(
            "  marker {} → size {:.2}, top {:.2}, left {:.2}",
            i, placement.size, placement.top, placement.left
        );
    }

    println!("\n=== Seeded Determinism ===");

    // The same seed reproduces the same ring
    let layout = RadialLayout::try_new(2)?;
    let first = layout.compute_with(&mut StdRng::seed_from_u64(42));
    let second = layout.compute_with(&mut StdRng::seed_from_u64(42));

    println!("first run:  {:?}", first);
    println!("second run: {:?}", second);
    println!("identical:  {}", first == second);

    Ok(())
}
