/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Wide-area clustering of sites by their synergy.
//!
//! Dimensionality reduction and the clustering itself are delegated to a
//! [`ClusterAnalysis`]. This module prepares the data, groups the sites,
//! picks one representative site (i.e., centroid) per cluster and compares
//! the centroids of two clusterings.

use crate::describe::{argmax, argmin};
use crate::spatial::{pairwise_synergy, SynergyMode};
use crate::{CapacityFactor, Error, Float, Matrix, ResourceSeries, Result};
use serde::{Deserialize, Serialize};

/// Dimensionality reduction and clustering of a set of sites
pub trait ClusterAnalysis {
    /// Reduces `features` (one row per site) to `n_components` columns
    fn project(&self, features: &Matrix, n_components: usize) -> Result<Matrix>;

    /// Assigns each row of `points` to one of `n_clusters` clusters,
    /// returning labels between `0` and `n_clusters - 1`
    fn assign(&self, points: &Matrix, n_clusters: usize) -> Result<Vec<usize>>;
}

/// How the representative site of a cluster is chosen
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CentroidRule {
    /// Minimizes the sum of `sqrt(a^2 - b^2)` over the first projected
    /// component, where `a` is the candidate and `b` every other member.
    ///
    /// This reproduces published results, but it is not a distance: the
    /// square root of a negative number is `NaN`, and a candidate whose sum is
    /// `NaN` wins (the first one, if several).
    #[default]
    AsPublished,

    /// Minimizes the sum of Euclidean distances over all projected components
    Medoid,
}

/// Picks the member (1-based site) of a cluster that best represents it.
///
/// Row `i` of `projected` holds the coordinates of site `i + 1`.
pub fn select_cluster_centroid(members: &[usize], projected: &Matrix, rule: CentroidRule) -> Result<usize> {
    if members.is_empty() {
        return Err(Error::DegenerateSeries(
            "an empty cluster has no centroid".to_string(),
        ));
    }
    let (nrows, ncols) = projected.size();
    if ncols == 0 {
        return Err(Error::DegenerateSeries(
            "cannot pick a centroid without projected coordinates".to_string(),
        ));
    }
    let mut coordinates = Vec::with_capacity(members.len());
    for site in members {
        if *site == 0 || *site > nrows {
            return Err(Error::IndexOutOfRange(format!(
                "site {} is not among the {} projected sites",
                site, nrows
            )));
        }
        coordinates.push(projected.row(site - 1).map_err(Error::IndexOutOfRange)?);
    }

    let mut sums = vec![0.0; members.len()];
    for (i, a) in coordinates.iter().enumerate() {
        for (j, b) in coordinates.iter().enumerate() {
            if members[i] == members[j] {
                continue;
            }
            sums[i] += match rule {
                CentroidRule::AsPublished => (a[0] * a[0] - b[0] * b[0]).sqrt(),
                CentroidRule::Medoid => a
                    .iter()
                    .zip(b.iter())
                    .map(|(x, y)| (x - y) * (x - y))
                    .sum::<Float>()
                    .sqrt(),
            };
        }
    }

    let best = match sums.iter().position(|s| s.is_nan()) {
        Some(i) => {
            tracing::warn!(
                "the distances of the cluster centred on site {} are not finite",
                members[i]
            );
            i
        }
        None => argmin(&sums).map(|(i, _)| i).unwrap_or(0),
    };
    Ok(members[best])
}

/// Turns per-site labels into one group of 1-based sites per cluster
pub fn group_labels(labels: &[usize], n_clusters: usize) -> Result<Vec<Vec<usize>>> {
    let mut groups = vec![Vec::new(); n_clusters];
    for (i, label) in labels.iter().enumerate() {
        let group = groups.get_mut(*label).ok_or_else(|| {
            Error::IndexOutOfRange(format!(
                "site {} was labelled {}, but there are only {} clusters",
                i + 1,
                label,
                n_clusters
            ))
        })?;
        group.push(i + 1);
    }
    Ok(groups)
}

/// The outcome of clustering a set of sites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    /// The projected coordinates of each site, standardized per component
    pub projected: Matrix,

    /// The sites (1-based) in each cluster
    pub groups: Vec<Vec<usize>>,

    /// The representative site (1-based) of each cluster
    pub centroids: Vec<usize>,
}

/// Projects `features` (one row per site, typically a normalized
/// synergy matrix), standardizes the projection, clusters it and picks a
/// centroid for every cluster.
pub fn run_clustering<A: ClusterAnalysis>(
    analysis: &A,
    features: &Matrix,
    n_components: usize,
    n_clusters: usize,
    rule: CentroidRule,
) -> Result<Clustering> {
    let (n_sites, _) = features.size();
    if n_clusters == 0 || n_clusters > n_sites {
        return Err(Error::IndexOutOfRange(format!(
            "cannot make {} clusters out of {} sites",
            n_clusters, n_sites
        )));
    }
    let projected = analysis
        .project(features, n_components)?
        .standardize_columns()
        .map_err(Error::DegenerateSeries)?;
    let labels = analysis.assign(&projected, n_clusters)?;
    if labels.len() != n_sites {
        return Err(Error::ShapeMismatch(format!(
            "got {} cluster labels for {} sites",
            labels.len(),
            n_sites
        )));
    }
    let groups = group_labels(&labels, n_clusters)?;
    let centroids = groups
        .iter()
        .map(|members| select_cluster_centroid(members, &projected, rule))
        .collect::<Result<Vec<usize>>>()?;
    tracing::info!("grouped {} sites into {} clusters", n_sites, n_clusters);
    Ok(Clustering {
        projected,
        groups,
        centroids,
    })
}

/// The centroid of a clustering that matches a centroid of another one the best (or worst)
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidMatch {
    /// The matching centroid (a 1-based site)
    pub site: usize,

    /// Their synergy coefficient
    pub synergy: Float,
}

/// The synergy between the centroids of two clusterings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossClusterSynergy {
    /// Row `i` and column `j` hold the synergy between centroid `i`
    /// of the first set and centroid `j` of the second
    pub matrix: Matrix,

    /// For each centroid of the first set, the most complementary centroid of the second
    pub best: Vec<CentroidMatch>,

    /// For each centroid of the first set, the least complementary centroid of the second
    pub worst: Vec<CentroidMatch>,
}

/// Compares the centroids of two clusterings (e.g., one made on
/// wind-wind synergy and another on solar-solar synergy). The first
/// resource of `mode` is read at `centroids_a`, the second at `centroids_b`.
pub fn cross_cluster_synergy(
    wind: &ResourceSeries<CapacityFactor>,
    solar: &ResourceSeries<CapacityFactor>,
    centroids_a: &[usize],
    centroids_b: &[usize],
    mode: SynergyMode,
) -> Result<CrossClusterSynergy> {
    wind.check_same_shape(solar)?;
    if centroids_b.is_empty() {
        return Err(Error::DegenerateSeries(
            "there are no centroids to compare with".to_string(),
        ));
    }
    let (first, second) = mode.select(wind, solar);
    let mut matrix = Matrix::new(0.0, centroids_a.len(), centroids_b.len());
    let mut best = Vec::with_capacity(centroids_a.len());
    let mut worst = Vec::with_capacity(centroids_a.len());
    for (i, a) in centroids_a.iter().enumerate() {
        let row_a = first.decade_view(*a)?;
        let mut row = Vec::with_capacity(centroids_b.len());
        for (j, b) in centroids_b.iter().enumerate() {
            let v = pairwise_synergy(row_a, second.decade_view(*b)?)?;
            matrix.set(i, j, v).map_err(Error::IndexOutOfRange)?;
            row.push(v);
        }
        if let (Some((hi, max)), Some((lo, min))) = (argmax(&row), argmin(&row)) {
            best.push(CentroidMatch {
                site: centroids_b[hi],
                synergy: max,
            });
            worst.push(CentroidMatch {
                site: centroids_b[lo],
                synergy: min,
            });
        }
    }
    Ok(CrossClusterSynergy { matrix, best, worst })
}

/// Principal component analysis followed by k-means, from `smartcore`
#[cfg(feature = "clustering")]
pub mod pca_kmeans {
    use super::ClusterAnalysis;
    use crate::{Error, Float, Matrix, Result};
    use smartcore::cluster::kmeans::{KMeans, KMeansParameters};
    use smartcore::decomposition::pca::{PCAParameters, PCA};
    use smartcore::linalg::basic::arrays::Array;
    use smartcore::linalg::basic::matrix::DenseMatrix;

    /// Runs PCA and k-means with `smartcore`
    #[derive(Debug, Copy, Clone)]
    pub struct PcaKMeans {
        /// The maximum number of k-means iterations
        pub max_iter: usize,
    }

    impl Default for PcaKMeans {
        fn default() -> Self {
            Self { max_iter: 100 }
        }
    }

    fn to_dense(m: &Matrix) -> DenseMatrix<Float> {
        let (nrows, ncols) = m.size();
        DenseMatrix::new(nrows, ncols, m.as_slice().to_vec(), false)
    }

    impl ClusterAnalysis for PcaKMeans {
        fn project(&self, features: &Matrix, n_components: usize) -> Result<Matrix> {
            let x = to_dense(features);
            let pca = PCA::fit(&x, PCAParameters::default().with_n_components(n_components))
                .map_err(|e| Error::DegenerateSeries(format!("PCA failed: {}", e)))?;
            let reduced = pca
                .transform(&x)
                .map_err(|e| Error::DegenerateSeries(format!("PCA failed: {}", e)))?;
            let (nrows, ncols) = reduced.shape();
            let mut data = Vec::with_capacity(nrows * ncols);
            for i in 0..nrows {
                for j in 0..ncols {
                    data.push(*reduced.get((i, j)));
                }
            }
            Matrix::from_data(nrows, ncols, data).map_err(Error::ShapeMismatch)
        }

        fn assign(&self, points: &Matrix, n_clusters: usize) -> Result<Vec<usize>> {
            let x = to_dense(points);
            let parameters = KMeansParameters::default()
                .with_k(n_clusters)
                .with_max_iter(self.max_iter);
            let kmeans: KMeans<Float, u32, DenseMatrix<Float>, Vec<u32>> = KMeans::fit(&x, parameters)
                .map_err(|e| Error::DegenerateSeries(format!("k-means failed: {}", e)))?;
            let labels = kmeans
                .predict(&x)
                .map_err(|e| Error::DegenerateSeries(format!("k-means failed: {}", e)))?;
            Ok(labels.into_iter().map(|l| l as usize).collect())
        }
    }
}
