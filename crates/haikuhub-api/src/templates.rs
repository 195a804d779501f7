//! Page template setup.

use tera::Tera;

use haikuhub_core::error::AppError;
use haikuhub_core::result::AppResult;

/// Builds the template engine with the embedded page templates.
pub fn build_templates() -> AppResult<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template("index.html", include_str!("../templates/index.html"))
        .map_err(|e| AppError::internal(format!("template parse failed: {e}")))?;
    Ok(tera)
}
