/// Ports module defining interfaces for hexagonal architecture
///
/// The application core only talks to the outside world (the two remote
/// services, the console and the file system) through these traits.
pub mod outbound;
