// gensizes/src/processors/mod.rs
mod counter;
mod probe;
mod source;
mod writer;

pub use counter::{LineCounter, NativeLineCounter, WcLineCounter};
pub use probe::{parse_dimensions, CommandProbe, Probe, ProbeError};
pub use source::LineSource;
pub use writer::ResultWriter;
