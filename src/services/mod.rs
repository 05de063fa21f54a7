pub mod database;
pub mod probe;
pub mod registry;
pub mod system_sampler;

pub use database::check_database;
pub use probe::HealthProbe;
pub use registry::ProcessRegistry;
pub use system_sampler::SystemSampler;
