/// Language front ends for the tracer.
///
/// Only Java is analysed: every stage downstream of the parser works on
/// `Class:method` identifiers taken from Java declarations.
pub mod java;
