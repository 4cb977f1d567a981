//! Writes the OpenAPI document of the brand health API to a file.
//!
//! ```bash
//! cargo run -p bh-api --bin generate_openapi --features openapi -- docs/api/openapi.json
//! ```

use std::env;
use std::fs;
use std::path::Path;

use bh_api::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let output_path = env::args()
		.nth(1)
		.unwrap_or_else(|| "docs/api/openapi.json".to_string());

	if let Some(parent) = Path::new(&output_path).parent() {
		if !parent.as_os_str().is_empty() && !parent.exists() {
			fs::create_dir_all(parent)?;
		}
	}

	let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
	fs::write(&output_path, json)?;
	println!("OpenAPI specification written to {}", output_path);

	Ok(())
}
