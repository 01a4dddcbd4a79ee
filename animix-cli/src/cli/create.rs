use animix_lib::mixer::MixSpec;

use super::CliError;

/// Print an example mix spec to stdout.
pub fn run_create_mix_json() -> Result<i32, CliError> {
    let json = MixSpec::example()
        .to_json_string()
        .map_err(|err| CliError::Spec("<example>".to_string(), err))?;
    println!("{}", json);
    Ok(0)
}
