// libnfp/src/device/operations/mod.rs

//! Operations on a mounted tag, grouped by the part of the record they
//! touch. Each group implements the locked logic on `DeviceInner` and the
//! public entry point on `TagDevice`.

mod admin;
mod application_area;
mod flush;
mod register;
