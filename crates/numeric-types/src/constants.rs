// ─────────────────────────────────────────────────────────────────────
// SCPN Numeric Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Magnitude below which a pivot, determinant contribution, or right-hand
/// side entry is treated as zero by the linear and least-squares solvers.
pub const SMALL_NUMBER: f64 = 1.0e-12;
