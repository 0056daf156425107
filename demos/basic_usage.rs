// ============================================================================
// Basic Usage Example
// ============================================================================

use quantity_engine::prelude::*;

fn main() -> Result<(), UnitError> {
    #[cfg(feature = "logging")]
    quantity_engine::utils::init_tracing(tracing::Level::DEBUG);

    println!("=== Quantity Engine Example ===\n");

    // Quantities from numbers and units
    let m = unit("m")?;
    let cm = unit("cm")?;
    let length = 1.0 * &m;
    let extra = 25.0 * &cm;
    println!("{} + {} = {}", length, extra, (&length + &extra)?);

    // Unit algebra and decomposition
    let speed: Quantity = "3.5 km / s".parse()?;
    let au_per_year = speed.to(&unit("au / yr")?)?;
    println!("{} = {:.4}", speed, au_per_year);
    println!("{} in CGS base units: {}", speed, speed.cgs());

    // Physical types
    let kinematic = unit("m2 / s")?;
    println!("\n[{}] is {}", kinematic, classify(&kinematic));
    println!("[J] is {}", classify(&unit("J")?));
    println!("[m7 / A3] is {}", classify(&unit("m7 / A3")?));

    // Dimension errors are explicit
    println!("\nAdding incompatible quantities:");
    match &Quantity::new(3.0, m.clone()) + &Quantity::new(3.0, unit("s")?) {
        Ok(q) => println!("  unexpected result {}", q),
        Err(e) => println!("  {}", e),
    }

    // Equivalencies are never applied implicitly
    println!("\nEquivalencies:");
    let ev = Quantity::new(1.0, unit("eV")?);
    if let Err(e) = ev.to(&unit("K")?) {
        println!("  without: {}", e);
    }
    let kelvin = ev.to_with(&unit("K")?, &[equivalencies::temperature_energy()])?;
    println!("  with temperature_energy: {} = {:.3}", ev, kelvin);

    let green = Quantity::new(532.0, unit("nm")?);
    let photon = green.to_with(&unit("eV")?, &[equivalencies::spectral()])?;
    println!("  {} photon carries {:.4}", green, photon);

    let body = Quantity::new(20.0, unit("deg_C")?);
    let fahrenheit = body.to_with(&unit("deg_F")?, &[equivalencies::temperature()])?;
    println!("  {} = {:.1}", body, fahrenheit);

    // A custom equivalency
    let rest = Quantity::new(1.420_405_751, unit("GHz")?);
    let doppler = equivalencies::doppler_radio(&rest)?;
    let observed = Quantity::new(1.4200, unit("GHz")?);
    println!(
        "  HI line observed at {} moves at {:.3}",
        observed,
        observed.to_with(&unit("km / s")?, &[doppler])?
    );

    // Constants with several realizations
    println!("\nConstants:");
    let e = Constant::lookup("e")?;
    match e.quantity() {
        Ok(q) => println!("  e = {}", q),
        Err(err) => println!("  {}", err),
    }
    println!("  e (gauss) = {}", e.gauss()?);
    println!("  G (cgs) = {}", Constant::lookup("G")?.cgs()?);

    // Converter from a preset configuration
    println!("\nPlasma converter:");
    let converter = create_from_config(&EngineConfig::plasma().with_display_precision(4))?;
    let t = Quantity::new(10.0, unit("eV")?);
    println!("  {} = {}", t, converter.format(&converter.convert(&t, &unit("K")?)?));
    println!("  e = {}", converter.format(&converter.constant("e")?));

    // Plasma formulary
    println!("\nFormulary (T = 10 eV, n = 1e19 m^-3, B = 2.5 T):");
    let n = Quantity::new(1.0e19, unit("1 / m3")?);
    let b = Quantity::new(2.5, unit("T")?);
    let electron = Particle::electron();
    let proton = Particle::proton();
    println!("  electron thermal speed: {:.4e}", formulary::thermal_speed(&t, &electron)?.scalar().unwrap_or(f64::NAN));
    println!("  plasma frequency:       {:.4}", formulary::plasma_frequency(&n, &electron)?);
    println!("  Debye length:           {:.4}", formulary::debye_length(&t, &n)?);
    println!("  electron gyroradius:    {:.4}", formulary::gyroradius(&b, &electron, &t)?);
    println!("  Alfven speed:           {:.4}", formulary::alfven_speed(&b, &n, &proton)?);
    println!("  magnetic pressure:      {:.4}", formulary::magnetic_pressure(&b)?);

    // Arrays flow through elementwise
    let temps = Quantity::new(vec![1.0, 10.0, 100.0], unit("eV")?);
    println!("  thermal speeds:         {:.4}", formulary::thermal_speed(&temps, &proton)?);

    // Plotting onto a recording surface
    let surface = RecordingSurface::new();
    let series = PlotSeries::new(&temps, &formulary::thermal_speed(&temps, &proton)?)?
        .with_y_unit(unit("km / s")?)?
        .with_label("proton thermal speed");
    surface.draw(&series)?;
    for drawn in surface.drawn() {
        println!("\nPlotted '{}': x = {}, y = {}", drawn.label.unwrap_or_default(), drawn.x_label, drawn.y_label);
        println!("  {:?}", drawn.y);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
