pub mod activation;
pub mod config;
pub mod eligibility;
pub mod order;
pub mod platform;
pub mod testing;

pub use activation::{ActivationOutcome, ActivationProcessor, Sleeper, TokioSleeper};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, ActivationConfig,
    Config, ConfigError, InviteMethod, SanitizedConfig, ServerConfig, ShopifyConfig,
};
pub use eligibility::{check_eligibility, resolve_contact, Contact, Eligibility};
pub use order::{LineItem, Order, OrderCustomer, OrderError, ResourceId};
pub use platform::{
    CommercePlatform, Customer, CustomerGid, CustomerState, InviteResult, PlatformError,
    ShopifyClient, UserError,
};
