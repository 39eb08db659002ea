use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("serverstatus version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
