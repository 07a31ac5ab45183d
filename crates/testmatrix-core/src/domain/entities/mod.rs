pub mod environment;
pub mod variant;
pub mod variant_list;
pub mod variant_spec;

pub use environment::Environment;
pub use variant::{ModuleHosting, Variant};
pub use variant_list::{Cases, TestCase, VariantList};
pub use variant_spec::VariantSpec;
