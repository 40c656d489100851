use crate::core::geo::distance_km;
use crate::domain::model::{Branch, Coordinate, RankedBranch};

/// Orders branches by distance from `origin`.
///
/// Without an origin the registry order is kept and nothing is annotated or marked
/// nearest. With one, every entry carries its distance and the sort is stable, so
/// equidistant branches keep their registry order.
pub fn rank_branches(branches: &[Branch], origin: Option<Coordinate>) -> Vec<RankedBranch> {
    let Some(origin) = origin else {
        return branches
            .iter()
            .map(|branch| RankedBranch {
                branch: *branch,
                distance_km: None,
                is_nearest: false,
            })
            .collect();
    };

    let mut ranked: Vec<(f64, Branch)> = branches
        .iter()
        .map(|branch| (distance_km(origin, branch.coordinate), *branch))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (distance, branch))| RankedBranch {
            branch,
            distance_km: Some(distance),
            is_nearest: index == 0,
        })
        .collect()
}

pub fn nearest_branch(branches: &[Branch], origin: Coordinate) -> Option<RankedBranch> {
    rank_branches(branches, Some(origin)).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::BRANCHES;

    fn ids(ranked: &[RankedBranch]) -> Vec<&'static str> {
        ranked.iter().map(|r| r.branch.id).collect()
    }

    #[test]
    fn test_no_origin_keeps_registry_order() {
        let ranked = rank_branches(BRANCHES, None);

        assert_eq!(
            ids(&ranked),
            BRANCHES.iter().map(|b| b.id).collect::<Vec<_>>()
        );
        assert!(ranked.iter().all(|r| r.distance_km.is_none()));
        assert!(ranked.iter().all(|r| !r.is_nearest));
    }

    #[test]
    fn test_origin_at_petaling_jaya() {
        let ranked = rank_branches(BRANCHES, Some(Coordinate::new(3.1167, 101.6219)));

        assert_eq!(
            ids(&ranked),
            vec!["td-pj", "is-bj", "is-sentul", "is-setapak", "is-pg"]
        );
        assert_eq!(ranked[0].distance_km, Some(0.0));
        assert!(ranked[0].is_nearest);
        assert!(ranked[1..].iter().all(|r| !r.is_nearest));

        let distances: Vec<f64> = ranked.iter().filter_map(|r| r.distance_km).collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_ties_keep_registry_order() {
        let origin = Coordinate::new(0.0, 0.0);
        let mut east = BRANCHES[0];
        east.id = "east";
        east.coordinate = Coordinate::new(0.0, 1.0);
        let mut west = BRANCHES[1];
        west.id = "west";
        west.coordinate = Coordinate::new(0.0, -1.0);
        let mut far = BRANCHES[2];
        far.id = "far";
        far.coordinate = Coordinate::new(5.0, 5.0);

        let ranked = rank_branches(&[far, west, east], Some(origin));
        assert_eq!(ids(&ranked), vec!["west", "east", "far"]);

        let ranked = rank_branches(&[east, far, west], Some(origin));
        assert_eq!(ids(&ranked), vec!["east", "west", "far"]);
    }

    #[test]
    fn test_nearest_branch() {
        let near_sentul = Coordinate::new(3.1980, 101.6930);
        let nearest = nearest_branch(BRANCHES, near_sentul).unwrap();
        assert_eq!(nearest.branch.id, "is-sentul");
        assert!(nearest.distance_km.unwrap() < 1.0);

        assert!(nearest_branch(&[], near_sentul).is_none());
    }
}
