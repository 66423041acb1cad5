use crate::types::{Vec3, AU_KM, KM_PER_UNIT};

/// Heliocentric position from classical elements, in thousands of km.
///
/// Conic radius from the true anomaly, placed in the perifocal plane and
/// rotated PQW → inertial with the closed-form 3-1-3 Euler matrix
/// (argument of periapsis, inclination, ascending node).
///
/// Inputs are not validated: e >= 1 or a <= 0 produce numbers, not errors.
pub fn compute_position(
    sma_au: f64,
    ecc: f64,
    inc_deg: f64,
    raan_deg: f64,
    argp_deg: f64,
    true_anom_deg: f64,
) -> Vec3 {
    let inc = inc_deg.to_radians();
    let raan = raan_deg.to_radians();
    let argp = argp_deg.to_radians();
    let nu = true_anom_deg.to_radians();

    let sma_km = sma_au * AU_KM;
    let (sin_nu, cos_nu) = nu.sin_cos();
    let r = sma_km * (1.0 - ecc * ecc) / (1.0 + ecc * cos_nu);

    // Position in perifocal frame (PQW)
    let x_pf = r * cos_nu;
    let y_pf = r * sin_nu;

    let (sin_raan, cos_raan) = raan.sin_cos();
    let (sin_argp, cos_argp) = argp.sin_cos();
    let (sin_inc, cos_inc) = inc.sin_cos();

    let pos_km = Vec3::new(
        (cos_raan * cos_argp - sin_raan * sin_argp * cos_inc) * x_pf
            + (-cos_raan * sin_argp - sin_raan * cos_argp * cos_inc) * y_pf,
        (sin_raan * cos_argp + cos_raan * sin_argp * cos_inc) * x_pf
            + (-sin_raan * sin_argp + cos_raan * cos_argp * cos_inc) * y_pf,
        (sin_argp * sin_inc) * x_pf + (cos_argp * sin_inc) * y_pf,
    );

    pos_km / KM_PER_UNIT
}

/// Mean anomaly (deg) for a true anomaly (deg) on an elliptic orbit.
///
/// Goes through the eccentric anomaly, `E = atan2(sqrt(1-e^2) sin v, e + cos v)`,
/// then Kepler's equation `M = E - e sin E`. Result lies in (-180, 180].
pub fn true_to_mean_anomaly(true_anom_deg: f64, ecc: f64) -> f64 {
    let nu = true_anom_deg.to_radians();
    let ecc_anom = ((1.0 - ecc * ecc).sqrt() * nu.sin()).atan2(ecc + nu.cos());
    (ecc_anom - ecc * ecc_anom.sin()).to_degrees()
}
