use ndarray::prelude::*;
use std::ops::Index;

/// Copy of the simplex taken at one iteration
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    points: Array2<f64>,
    values: Array1<f64>,
    stopping_criterion: f64,
}

impl Snapshot {
    pub(crate) fn new(points: &Array2<f64>, values: &Array1<f64>, stopping_criterion: f64) -> Self {
        Snapshot {
            points: points.clone(),
            values: values.clone(),
            stopping_criterion,
        }
    }

    /// Vertices at this iteration, one row per vertex
    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Sum of squared deviations of the values; infinite for the starting simplex
    pub fn stopping_criterion(&self) -> f64 {
        self.stopping_criterion
    }

    pub fn point(&self, i: usize) -> ArrayView1<f64> {
        self.points.row(i)
    }

    /// Index and value of the lowest vertex, first index wins on ties
    pub fn best(&self) -> (usize, f64) {
        let mut i_b = 0;
        let mut y_b = self.values[0];
        for (i, &y) in self.values.iter().enumerate().skip(1) {
            if y < y_b {
                y_b = y;
                i_b = i;
            }
        }
        (i_b, y_b)
    }
}

/// Ordered, append-only record of the simplex over a run.
///
/// Entry 0 is the evaluated starting simplex, entry `k` the simplex after
/// iteration `k` when recording was enabled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        History { snapshots: vec![] }
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub(crate) fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn get(&self, i: usize) -> Option<&Snapshot> {
        self.snapshots.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Stopping criterion of every snapshot, in order
    pub fn stopping_criteria(&self) -> Array1<f64> {
        self.snapshots
            .iter()
            .map(|s| s.stopping_criterion)
            .collect()
    }

    /// Best value of every snapshot, in order
    pub fn best_values(&self) -> Array1<f64> {
        self.snapshots.iter().map(|s| s.best().1).collect()
    }
}

impl Index<usize> for History {
    type Output = Snapshot;

    fn index(&self, i: usize) -> &Snapshot {
        &self.snapshots[i]
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod minimize_history_tests {
    use super::*;

    fn snapshot(values: Array1<f64>, stopping_criterion: f64) -> Snapshot {
        let points = Array2::from_shape_fn((values.len(), values.len() - 1), |(i, j)| {
            (i * 10 + j) as f64
        });
        Snapshot::new(&points, &values, stopping_criterion)
    }

    #[test]
    fn snapshot_is_a_deep_copy() {
        let mut points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let mut values = array![3.0, 2.0, 1.0];
        let snap = Snapshot::new(&points, &values, f64::INFINITY);

        points[(0, 0)] = 42.0;
        values[0] = -1.0;

        assert_eq!(snap.points()[(0, 0)], 0.0);
        assert_eq!(snap.values()[0], 3.0);
        assert_eq!(snap.point(2).to_vec(), vec![0.0, 1.0]);
        assert!(snap.stopping_criterion().is_infinite());
    }

    #[test]
    fn best_prefers_first_on_ties() {
        let snap = snapshot(array![2.0, 1.0, 1.0], 0.0);
        assert_eq!(snap.best(), (1, 1.0));
    }

    #[test]
    fn append_keeps_order() {
        let mut history = History::new();
        assert!(history.is_empty());
        history.push(snapshot(array![3.0, 2.0, 1.0], f64::INFINITY));
        history.push(snapshot(array![1.5, 2.0, 1.0], 0.25));
        history.push(snapshot(array![1.5, 1.2, 1.0], 0.0625));

        assert_eq!(history.len(), 3);
        assert!(history[0].stopping_criterion().is_infinite());
        assert_eq!(history.last().unwrap().stopping_criterion(), 0.0625);
        assert_eq!(history.best_values().to_vec(), vec![1.0, 1.0, 1.0]);
        assert_eq!(history.stopping_criteria()[1], 0.25);
        assert_eq!((&history).into_iter().count(), 3);

        history.clear();
        assert!(history.first().is_none());
    }
}
