//! Numerical kernels for dense small matrices.
//!
//! Four independent solver families over caller-owned buffers: dense linear
//! systems ([`linear`]), symmetric eigendecomposition ([`eigen`]), real
//! polynomial roots ([`roots`]), and least-squares fitting ([`lstsq`]).

pub mod eigen;
pub mod linear;
pub mod lstsq;
pub mod roots;
