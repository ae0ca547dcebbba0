use crate::error::{Error, Result};

/// One-hot target with soft values: `on` at `label`, `off` everywhere else.
pub fn soft_target(label: usize, classes: usize, on: f64, off: f64) -> Result<Vec<f64>> {
    if label >= classes {
        return Err(Error::InvalidParameter(format!(
            "label {} out of range for {} classes",
            label, classes
        )));
    }
    let mut target = vec![off; classes];
    target[label] = on;
    Ok(target)
}
