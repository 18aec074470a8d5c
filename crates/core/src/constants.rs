/// Language used when neither the caller nor the configuration names one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Field name given to a scalar item when a list entry is not a mapping
pub const SCALAR_ITEM_FIELD: &str = "0";
