//! Numerical kernels: design matrix, normal equations, LU and QR solves.

pub mod design;
pub mod lu;
pub mod normal;
pub mod qr;

pub use design::*;
pub use lu::*;
pub use normal::*;
pub use qr::*;
