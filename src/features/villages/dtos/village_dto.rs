use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VillageRequestDto {
    #[validate(
        length(min = 1, max = 128, message = "Nama desa wajib diisi"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    /// District
    #[validate(length(max = 128))]
    pub kecamatan: Option<String>,

    /// Regency
    #[validate(length(max = 128))]
    pub kabupaten: Option<String>,
}
