pub mod claim;
pub mod filter;
pub mod hooks;
pub mod ocr;
pub mod placer;
pub mod processor;
pub mod watchdog;

pub use claim::ClaimedFile;
pub use filter::ExtensionSet;
pub use ocr::{ConversionResult, Invocation, InvocationStyle, OcrCommand};
pub use placer::OutputPlacer;
pub use processor::{DocumentOutcome, process_document};
pub use watchdog::{PassSummary, Watchdog};
