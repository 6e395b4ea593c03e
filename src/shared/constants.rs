/// Default page size for pagination
#[allow(dead_code)]
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
#[allow(dead_code)]
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Site-wide admin - can manage every collection point and read audit logs
pub const ROLE_ADMIN: &str = "admin";

/// Point admin - manages the collection points they created
#[allow(dead_code)]
pub const ROLE_POINT_ADMIN: &str = "point_admin";

// =============================================================================
// SUPPLY NEED CATEGORIES
// =============================================================================

/// Canonical category list for supply needs.
///
/// "Outros" is the escape hatch: needs in that category carry a required
/// free-text label.
pub const NEED_CATEGORIES: [&str; 19] = [
    "Água",
    "Alimento não perecível",
    "Alimento pronto",
    "Roupa masculina",
    "Roupa feminina",
    "Roupa infantil",
    "Colchões",
    "Cobertores",
    "Roupa de cama",
    "Produtos de higiene pessoal",
    "Produtos de higiene feminina",
    "Fraldas infantis",
    "Fraldas para idosos",
    "Ração animal",
    "Produtos de limpeza",
    "Roupas Íntimas Novas",
    "Papel Higiênico",
    "Leite em pó/Fórmula",
    "Outros",
];

/// Category that requires a custom label
pub const CATEGORY_OTHER: &str = "Outros";

/// A description with this exact value marks a collection point as a shelter
pub const SHELTER_DESCRIPTION: &str = "Abrigo";

// =============================================================================
// REPORT LIMITS
// =============================================================================

pub const REPORT_ADDRESS_MAX_LEN: u64 = 200;
pub const REPORT_NEIGHBORHOOD_MAX_LEN: u64 = 100;
pub const REPORT_REFERENCE_MAX_LEN: u64 = 150;
pub const REPORT_DESCRIPTION_MAX_LEN: u64 = 500;

/// Rate-limit bucket name for anonymous report submission
pub const ACTION_CREATE_REPORT: &str = "create_report";

/// Allowed time windows (in hours) for the public report listing
pub const REPORT_WINDOW_HOURS: [i64; 3] = [6, 12, 24];

/// Window applied when the listing does not ask for one
pub const DEFAULT_REPORT_WINDOW_HOURS: i64 = 24;

// =============================================================================
// USER-FACING MESSAGES (pt-BR)
// =============================================================================

pub const MSG_LOCATION_NOT_FOUND: &str = "Localização não encontrada.";
pub const MSG_POINT_NOT_FOUND: &str = "Ponto de coleta não encontrado.";
pub const MSG_NEED_NOT_FOUND: &str = "Necessidade não encontrada.";
pub const MSG_NOT_POINT_MANAGER: &str = "Você não gerencia este ponto de coleta.";
pub const MSG_FILL_ALL_FIELDS: &str = "Preencha todos os campos.";
pub const MSG_INVALID_CREDENTIALS: &str = "Email ou senha inválidos.";
pub const MSG_REPORT_RATE_LIMITED: &str =
    "Muitos alertas enviados. Aguarde um pouco antes de enviar outro.";
