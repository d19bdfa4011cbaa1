pub mod panic_guard;
pub mod structured_logger;

pub use panic_guard::PanicGuard;
pub use structured_logger::StructuredLogger;
