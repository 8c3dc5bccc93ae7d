use anyhow::Result;
use ethlab_common::setup_tracing;
use ethlab_units::{
    format_ether, format_units, format_units_trimmed, parse_ether, parse_units, BaseAmount, Unit,
};

fn main() -> Result<()> {
    setup_tracing();

    println!("\n1. BaseAmount");
    let one_gwei: BaseAmount = "1000000000".parse()?;
    println!("{}", one_gwei);
    println!("{}", BaseAmount::from_hex_str("0x3b9aca00")?);
    println!("{}", BaseAmount::from(1_000_000_000u64));
    println!("Largest u64: {}", u64::MAX);
    println!("Addition: {}", one_gwei.clone() + 1u64);
    println!("Subtraction: {}", one_gwei.try_sub(&BaseAmount::from(1u64))?);
    println!("Multiplication: {}", one_gwei.clone() * 2u64);
    println!("Division: {}", one_gwei.clone() / 2u64);
    println!("Are they equal? {}", one_gwei == BaseAmount::from(1_000_000_000u64));

    println!("\n2. Formatting: small units to large units");
    println!("{}", format_units(&one_gwei, 0)?);
    println!("{}", format_units(&one_gwei, "gwei")?);
    println!("{}", format_units(&one_gwei, 9)?);
    println!("{}", format_units(&one_gwei, "ether")?);
    println!("{}", format_ether(&one_gwei));
    println!("trimmed: {}", format_units_trimmed(&one_gwei, "gwei")?);

    println!("\n3. Parsing: large units to small units");
    println!("{}", Unit::default().parse("1.0")?);
    println!("{}", parse_units("1.0", "ether")?);
    println!("{}", parse_units("1.0", 18)?);
    println!("{}", parse_units("1.0", "gwei")?);
    println!("{}", parse_units("1.0", 9)?);
    println!("{}", parse_ether("1.0")?);

    Ok(())
}
