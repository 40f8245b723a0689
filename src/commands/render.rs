use pageveil::{Result, VeilConfig};

pub fn run(config: VeilConfig, seed: Option<u64>) -> Result<()> {
    let installer = super::installer(config, seed)?;
    println!("{}", installer.script());
    Ok(())
}
