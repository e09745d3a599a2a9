//! Setting value validation.

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "LABEL_WIDTH_MM" | "LABEL_HEIGHT_MM" => {
            let v: f64 = value.parse().map_err(|_| "must be a number")?;
            if !v.is_finite() || v <= 0.0 || v > 1000.0 {
                return Err("must be greater than 0 and at most 1000".into());
            }
        }
        "LABEL_DPI" | "PRINT_DPI" => validate_int_range(value, 72, 1200)?,
        "LABEL_ORIENTATION" => {
            if value != "portrait" && value != "landscape" {
                return Err("must be 'portrait' or 'landscape'".into());
            }
        }
        "CURRENCY_MARKER" => {
            if value.chars().count() > 8 {
                return Err("must be at most 8 characters".into());
            }
        }
        "PRINTER_NAME" => {
            if value.len() > 255 {
                return Err("printer name must be 1-255 characters".into());
            }
        }
        // Boolean settings
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i32, max: i32) -> Result<(), String> {
    let v: i32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, "SCAN_LOG_JSON")
}
