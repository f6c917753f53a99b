// src/config/consts.rs

// Net config
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const QUOTE_ENDPOINT_PATH: &str = "/api/shipping/calculate-shopify";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Widget defaults
pub const DEFAULT_ORIGIN_CEP: &str = "01001000";
pub const DEFAULT_MOUNT_ID: &str = "calculador-frete";

// CEP field: 8 digits + 1 hyphen in display form
pub const CEP_FIELD_MAX_LEN: usize = 9;

// Paste auto-trigger fires this long after the paste event
pub const PASTE_TRIGGER_DELAY_MS: u64 = 100;

// User-facing text (pt-BR, the widget's one fixed locale)
pub const MSG_INVALID_CEP: &str = "Por favor, insira um CEP válido";
pub const MSG_NO_OPTIONS: &str = "Nenhuma opção de frete disponível para este CEP";
pub const MSG_CALC_ERROR: &str = "Erro ao calcular frete";
pub const MSG_CONNECTION_ERROR: &str = "Erro de conexão. Tente novamente.";

pub const LABEL_TITLE: &str = "Calcular Frete";
pub const LABEL_SUBTITLE: &str = "Consulte o valor e prazo de entrega";
pub const LABEL_CEP_FIELD: &str = "CEP de destino:";
pub const LABEL_CEP_HINT: &str = "00000-000";
pub const LABEL_CALCULATE: &str = "Calcular";
pub const LABEL_LOADING: &str = "Calculando frete...";
pub const LABEL_CHEAPEST: &str = "Mais barato";
pub const LABEL_FASTEST: &str = "Mais rápido";
