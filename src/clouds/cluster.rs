use crate::{clouds::seed::Seed, foundation::core::Point};

/// Seeds judged close enough to render as one shape, in discovery order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cluster {
    pub seeds: Vec<Seed>,
}

impl Cluster {
    pub fn new(seeds: Vec<Seed>) -> Self {
        Self { seeds }
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Mean seed centre; `None` for an empty cluster.
    pub fn centroid(&self) -> Option<Point> {
        let n = self.len() as f64;
        (!self.is_empty()).then(|| {
            let (sx, sy) = self
                .seeds
                .iter()
                .fold((0.0, 0.0), |(sx, sy), s| (sx + s.x, sy + s.y));
            Point::new(sx / n, sy / n)
        })
    }

    /// Mean seed width and height; `None` for an empty cluster.
    pub fn average_size(&self) -> Option<(f64, f64)> {
        let n = self.len() as f64;
        (!self.is_empty()).then(|| {
            let (sw, sh) = self
                .seeds
                .iter()
                .fold((0.0, 0.0), |(sw, sh), s| (sw + s.w, sh + s.h));
            (sw / n, sh / n)
        })
    }
}

/// Pairwise merge test: centre distance below `merge_factor` times the pair's average size.
///
/// Symmetric but not transitive; chains are closed by [`cluster_indices`].
pub fn should_merge(a: &Seed, b: &Seed, merge_factor: f64) -> bool {
    let dist = (a.x - b.x).hypot(a.y - b.y);
    let size = (a.w + b.w + a.h + b.h) / 4.0;
    dist < size * merge_factor
}

/// Connected components of the [`should_merge`] graph, as indices into `seeds`.
///
/// Components are emitted in order of their first seed in the input. Inside a component,
/// indices appear in traversal order (depth-first from that first seed). Every index appears in
/// exactly one component.
pub fn cluster_indices(seeds: &[Seed], merge_factor: f64) -> Vec<Vec<usize>> {
    let mut used = vec![false; seeds.len()];
    let mut out = Vec::new();

    for start in 0..seeds.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let mut stack = vec![start];
        let mut component = Vec::new();

        while let Some(idx) = stack.pop() {
            let base = &seeds[idx];
            component.push(idx);

            for (j, other) in seeds.iter().enumerate() {
                if !used[j] && should_merge(base, other, merge_factor) {
                    used[j] = true;
                    stack.push(j);
                }
            }
        }

        out.push(component);
    }

    out
}

/// Group seeds into clusters; see [`cluster_indices`] for ordering.
#[tracing::instrument(skip(seeds), fields(seeds = seeds.len()))]
pub fn cluster_seeds(seeds: &[Seed], merge_factor: f64) -> Vec<Cluster> {
    let clusters: Vec<Cluster> = cluster_indices(seeds, merge_factor)
        .into_iter()
        .map(|idxs| Cluster::new(idxs.into_iter().map(|i| seeds[i]).collect()))
        .collect();
    tracing::debug!(clusters = clusters.len(), "clustered seeds");
    clusters
}

#[cfg(test)]
#[path = "../../tests/unit/clouds/cluster.rs"]
mod tests;
