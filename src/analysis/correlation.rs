use crate::data::model::{AirQualityDataset, Variable};

const N: usize = Variable::ALL.len();

/// Pairwise Pearson coefficients among [`Variable::ALL`].
///
/// `values[i][j]` is the coefficient between `Variable::ALL[i]` and
/// `Variable::ALL[j]`. Undefined coefficients (too few pairs, constant
/// column) are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub values: [[f64; N]; N],
}

impl CorrelationMatrix {
    pub fn get(&self, a: Variable, b: Variable) -> f64 {
        self.values[a.index()][b.index()]
    }

    pub fn variables(&self) -> &'static [Variable; N] {
        &Variable::ALL
    }
}

/// Pearson correlation over rows where both values are present.
fn pearson(pairs: impl Iterator<Item = (f64, f64)> + Clone) -> f64 {
    let (mut n, mut sx, mut sy) = (0usize, 0.0_f64, 0.0_f64);
    for (x, y) in pairs.clone() {
        n += 1;
        sx += x;
        sy += y;
    }
    if n < 2 {
        return f64::NAN;
    }
    let (mx, my) = (sx / n as f64, sy / n as f64);

    let (mut cov, mut vx, mut vy) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in pairs {
        let (dx, dy) = (x - mx, y - my);
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return f64::NAN;
    }
    (cov / (vx.sqrt() * vy.sqrt())).clamp(-1.0, 1.0)
}

/// Correlation matrix of the six numeric columns over the selected rows.
pub fn correlation_matrix(dataset: &AirQualityDataset, indices: &[usize]) -> CorrelationMatrix {
    let mut values = [[f64::NAN; N]; N];

    for (i, &a) in Variable::ALL.iter().enumerate() {
        for (j, &b) in Variable::ALL.iter().enumerate().skip(i) {
            let pairs = indices.iter().filter_map(|&k| {
                let m = &dataset.records[k];
                Some((m.value(a)?, m.value(b)?))
            });
            let r = pearson(pairs);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { values }
}

/// The weather variable whose correlation with PM2.5 has the largest
/// magnitude, together with its signed coefficient.
///
/// On equal magnitudes the variable listed first in [`Variable::ALL`] wins.
pub fn most_correlated_factor(matrix: &CorrelationMatrix) -> Option<(Variable, f64)> {
    Variable::ALL
        .iter()
        .copied()
        .filter(|&v| v != Variable::Pm25)
        .map(|v| (v, matrix.get(Variable::Pm25, v)))
        .filter(|(_, r)| !r.is_nan())
        .reduce(|best, next| if next.1.abs() > best.1.abs() { next } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::full;

    /// PM2.5 rises with pressure, falls faster with dew point, and barely
    /// tracks the rest.
    fn dataset() -> AirQualityDataset {
        AirQualityDataset::from_records(vec![
            //                                PM2.5  TEMP   PRES    DEWP   RAIN  WSPM
            full("2017-01-01", 0, "Dongsi", [10.0, 3.0, 1000.0, 9.0, 0.0, 2.0]),
            full("2017-01-01", 1, "Dongsi", [20.0, 1.0, 1003.0, 6.0, 1.0, 1.0]),
            full("2017-01-01", 2, "Dongsi", [30.0, 4.0, 1001.0, 3.0, 0.0, 3.0]),
            full("2017-01-01", 3, "Dongsi", [40.0, 2.0, 1004.0, 0.0, 1.0, 2.0]),
        ])
    }

    fn all(ds: &AirQualityDataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let ds = dataset();
        let m = correlation_matrix(&ds, &all(&ds));

        for a in Variable::ALL {
            assert!((m.get(a, a) - 1.0).abs() < 1e-12, "{a} diagonal");
            for b in Variable::ALL {
                let (ab, ba) = (m.get(a, b), m.get(b, a));
                assert!(ab == ba || (ab.is_nan() && ba.is_nan()));
            }
        }
    }

    #[test]
    fn test_known_coefficients() {
        let ds = dataset();
        let m = correlation_matrix(&ds, &all(&ds));

        assert!((m.get(Variable::Pm25, Variable::Dewp) + 1.0).abs() < 1e-12);
        assert!(m.get(Variable::Pm25, Variable::Pres) > 0.5);
    }

    #[test]
    fn test_most_correlated_uses_absolute_value() {
        let ds = dataset();
        let m = correlation_matrix(&ds, &all(&ds));

        let (var, r) = most_correlated_factor(&m).unwrap();
        assert_eq!(var, Variable::Dewp);
        assert!(r < 0.0, "sign is preserved in the result");
    }

    #[test]
    fn test_constant_column_is_nan_and_skipped() {
        let ds = AirQualityDataset::from_records(vec![
            full("2017-01-01", 0, "A", [1.0, 5.0, 1.0, 0.0, 0.0, 0.0]),
            full("2017-01-01", 1, "A", [2.0, 5.0, 2.0, 0.0, 0.0, 0.0]),
            full("2017-01-01", 2, "A", [3.0, 5.0, 2.0, 0.0, 0.0, 0.0]),
        ]);
        let m = correlation_matrix(&ds, &all(&ds));

        assert!(m.get(Variable::Pm25, Variable::Temp).is_nan());
        assert_eq!(most_correlated_factor(&m).map(|(v, _)| v), Some(Variable::Pres));
    }

    #[test]
    fn test_missing_values_use_pairwise_rows() {
        let mut rows = dataset().records;
        rows[0].temp = None;
        let ds = AirQualityDataset::from_records(rows);
        let m = correlation_matrix(&ds, &all(&ds));

        // DEWP pairs are untouched by the missing TEMP cell.
        assert!((m.get(Variable::Pm25, Variable::Dewp) + 1.0).abs() < 1e-12);
        assert!(!m.get(Variable::Pm25, Variable::Temp).is_nan());
    }

    #[test]
    fn test_tie_keeps_first_variable() {
        let mut values = [[f64::NAN; N]; N];
        let pm = Variable::Pm25.index();
        for (v, r) in [(Variable::Temp, 0.5), (Variable::Pres, -0.5), (Variable::Wspm, 0.5)] {
            values[pm][v.index()] = r;
            values[v.index()][pm] = r;
        }
        let m = CorrelationMatrix { values };

        assert_eq!(most_correlated_factor(&m), Some((Variable::Temp, 0.5)));
    }

    #[test]
    fn test_too_few_rows() {
        let ds = dataset();
        let m = correlation_matrix(&ds, &[0]);
        assert!(m.get(Variable::Pm25, Variable::Pm25).is_nan());
        assert!(most_correlated_factor(&m).is_none());
    }
}
