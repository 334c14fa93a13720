use rp_interp::{InterpMode, Series};
use tracing::debug;

use crate::keyword::{is_cell, is_cellperf, is_rate, is_timedef};
use crate::{Profiles, ProfilesResult};

/// Difference `a - b` on the time axis of `a`.
///
/// Time definition vectors are copied from `a`. Every other vector of `a`
/// with a counterpart in `b` (same keyword, name and identifier) becomes
/// `a - b(t)`, with `b` looked up by backwards stepping for rates and linearly
/// otherwise. Vectors without counterpart are left out, as are cell and
/// connection vectors when the grids differ. LGR names are carried over.
pub fn diff_profiles(a: &Profiles, b: &Profiles) -> ProfilesResult<Profiles> {
    let time_a = a.require("TIME", None)?.data();
    let time_b = b.require("TIME", None)?.data();
    let equal_grid = a.grid_dim == b.grid_dim;

    let mut out = Profiles::new(Some("DIFF"));
    out.start_date = a.start_date;
    out.grid_dim = a.grid_dim;

    let mut skipped = 0_usize;
    for v in a {
        let key = v.keyword();
        if is_timedef(key) {
            out.set_vector(key, v.data().to_vec(), None, None, Some(v.unit()))?;
            continue;
        }
        let Some(other) = b.get_vector(key, Some(v.name()), Some(v.num())) else {
            skipped += 1;
            continue;
        };
        if !equal_grid && (is_cell(other.keyword()) || is_cellperf(other.keyword())) {
            skipped += 1;
            continue;
        }
        let mode = if is_rate(key) {
            InterpMode::Backwards
        } else {
            InterpMode::Linear
        };
        let series = Series::new(time_b, other.data())?;
        let diff: Vec<f64> = time_a
            .iter()
            .zip(v.data())
            .map(|(&t, &x)| x - series.at(t, mode))
            .collect();
        out.set_vector(key, diff, Some(v.name()), Some(v.num()), Some(v.unit()))?;
        if let Some(d) = out.get_vector_mut(key, Some(v.name()), Some(v.num())) {
            d.set_lgr_name(v.lgr_name());
        }
    }
    debug!(vectors = out.vector_count(), skipped, "computed profiles difference");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProfilesError;

    fn set(times: Vec<f64>, wopr: Vec<f64>, grid: (usize, usize, usize)) -> Profiles {
        let mut p = Profiles::new(Some("S"));
        p.grid_dim = grid;
        let n = times.len();
        p.set_vector("TIME", times, None, None, Some("DAYS")).unwrap();
        p.set_vector("WOPR", wopr, Some("OP1"), None, Some("SM3/D"))
            .unwrap();
        p.set_vector("BPR", vec![100.0; n], None, Some(5), Some("BARS"))
            .unwrap();
        p.set_vector("WBHP", vec![200.0; n], Some("OP1"), None, Some("BARS"))
            .unwrap();
        p
    }

    #[test]
    fn identical_sets_give_zero() {
        let a = set(vec![0.0, 10.0, 20.0], vec![5.0, 6.0, 7.0], (2, 2, 2));
        let d = diff_profiles(&a, &a).unwrap();
        assert_eq!(d.id.as_deref(), Some("DIFF"));
        assert_eq!(d.get_time().unwrap(), &[0.0, 10.0, 20.0]);
        assert_eq!(d.get_vector("WOPR", None, None).unwrap().data(), &[0.0; 3]);
        // Linear lookup is zero at the first sample, so step 0 keeps `a`.
        assert_eq!(
            d.get_vector("WBHP", Some("OP1"), None).unwrap().data(),
            &[200.0, 0.0, 0.0]
        );
        assert_eq!(d.get_vector("BPR", None, Some(5)).unwrap().data(), &[100.0, 0.0, 0.0]);
    }

    #[test]
    fn rates_use_backwards_lookup_on_first_axis() {
        let a = set(vec![0.0, 5.0, 10.0], vec![10.0, 10.0, 10.0], (1, 1, 1));
        let b = set(vec![0.0, 10.0], vec![4.0, 8.0], (1, 1, 1));
        let d = diff_profiles(&a, &b).unwrap();
        let wopr = d.get_vector("WOPR", Some("OP1"), None).unwrap();
        assert_eq!(wopr.data(), &[6.0, 2.0, 2.0]);
        assert_eq!(wopr.unit(), "SM3/D");
    }

    #[test]
    fn lgr_names_are_carried_over() {
        let mut a = set(vec![0.0, 1.0], vec![3.0, 4.0], (1, 1, 1));
        a.get_vector_mut("WOPR", Some("OP1"), None)
            .unwrap()
            .set_lgr_name(" LGR1 ");
        let b = set(vec![0.0, 1.0], vec![1.0, 1.0], (1, 1, 1));
        let d = diff_profiles(&a, &b).unwrap();
        assert_eq!(d.get_vector("WOPR", Some("OP1"), None).unwrap().lgr_name(), "LGR1");
        assert_eq!(
            d.get_vector("WBHP", Some("OP1"), None).unwrap().lgr_name(),
            crate::NO_NAME
        );
    }

    #[test]
    fn cell_vectors_skipped_when_grids_differ() {
        let a = set(vec![0.0, 1.0], vec![1.0, 1.0], (10, 10, 3));
        let b = set(vec![0.0, 1.0], vec![1.0, 1.0], (5, 5, 3));
        let d = diff_profiles(&a, &b).unwrap();
        assert!(d.get_vector("BPR", None, None).is_none());
        assert!(d.get_vector("WBHP", Some("OP1"), None).is_some());
    }

    #[test]
    fn missing_time_is_reported() {
        let a = Profiles::default();
        assert!(matches!(
            diff_profiles(&a, &a),
            Err(ProfilesError::MissingVector { .. })
        ));
    }
}
