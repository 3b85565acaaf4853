use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_empty;

// Formulario "Registrar nuevo almacén"
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepotForm {
    #[validate(custom = "validate_not_empty")]
    pub name: String,
    #[validate(custom = "validate_not_empty")]
    pub address: String,
    /// Checkbox HTML: presente ("on") solo cuando está marcado
    #[serde(default)]
    pub is_default: Option<String>,
}

impl CreateDepotForm {
    pub fn wants_default(&self) -> bool {
        checkbox_checked(self.is_default.as_deref())
    }
}

// Actualizar el flag de predeterminado
#[derive(Debug, Deserialize)]
pub struct UpdateDepotDefaultForm {
    pub depot_id: String,
    #[serde(default)]
    pub is_default: Option<String>,
}

impl UpdateDepotDefaultForm {
    pub fn wants_default(&self) -> bool {
        checkbox_checked(self.is_default.as_deref())
    }
}

// Eliminar un almacén
#[derive(Debug, Deserialize)]
pub struct DeleteDepotForm {
    pub depot_id: String,
}

fn checkbox_checked(value: Option<&str>) -> bool {
    matches!(value, Some("on") | Some("true") | Some("1"))
}
