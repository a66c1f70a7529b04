use serde_json::json;

use crate::auth::hash_password;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub fn hash(password: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }

    let digest = hash_password(password);
    match output_format {
        OutputFormat::Json => output_success(output_format, "Password hashed", Some(json!({ "hash": digest }))),
        OutputFormat::Text => {
            println!("ADMIN_PASSWORD_HASH={}", digest);
            Ok(())
        }
    }
}
