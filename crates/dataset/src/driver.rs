use rand::Rng;
use tetra_generator::{IntersectionClass, PairGenerator, TetrahedronPair};
use tetra_kernel::{ConvexKernel, GeometryKernel};
use tracing::{debug, info, instrument};

use crate::config::{DatasetConfig, VolumeRange};
use crate::errors::DatasetError;
use crate::writer::DatasetWriter;

const CLASS_COUNT: usize = IntersectionClass::ALL.len();

/// Split `dataset_size` records across the classes by percentage.
///
/// Each class gets the floor of its exact share; the records left over go
/// to the classes with the largest fractional parts, lowest label first on
/// ties. The quotas always sum to `dataset_size`.
pub fn class_quotas(dataset_size: usize, distribution: &[f64; CLASS_COUNT]) -> [usize; CLASS_COUNT] {
    let total_share: f64 = distribution.iter().sum();
    if total_share <= 0.0 {
        return [0; CLASS_COUNT];
    }

    let exact = distribution.map(|pct| dataset_size as f64 * pct / total_share);
    let mut quotas = exact.map(|x| x.floor() as usize);

    let assigned: usize = quotas.iter().sum();
    let mut by_fraction: Vec<usize> = (0..CLASS_COUNT).collect();
    by_fraction.sort_by(|&a, &b| {
        let fa = exact[a] - exact[a].floor();
        let fb = exact[b] - exact[b].floor();
        fb.total_cmp(&fa).then(a.cmp(&b))
    });
    for &i in by_fraction.iter().cycle().take(dataset_size.saturating_sub(assigned)) {
        quotas[i] += 1;
    }
    quotas
}

/// Round-robin over the classes, skipping those whose quota is used up.
#[derive(Debug, Clone)]
struct ClassSchedule {
    remaining: [usize; CLASS_COUNT],
    cursor: usize,
}

impl ClassSchedule {
    fn new(quotas: [usize; CLASS_COUNT]) -> Self {
        Self {
            remaining: quotas,
            cursor: 0,
        }
    }
}

impl Iterator for ClassSchedule {
    type Item = IntersectionClass;

    fn next(&mut self) -> Option<Self::Item> {
        for _ in 0..CLASS_COUNT {
            let i = self.cursor;
            self.cursor = (i + 1) % CLASS_COUNT;
            if self.remaining[i] > 0 {
                self.remaining[i] -= 1;
                return Some(IntersectionClass::ALL[i]);
            }
        }
        None
    }
}

/// Histogram of polyhedron volumes over equal bins spanning a range.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeHistogram {
    range: VolumeRange,
    counts: Vec<usize>,
}

impl VolumeHistogram {
    pub fn new(range: VolumeRange, bins: usize) -> Self {
        Self {
            range,
            counts: vec![0; bins.max(1)],
        }
    }

    /// Count `volume`; values outside the range are ignored.
    pub fn record(&mut self, volume: f64) {
        if !self.range.contains(volume) {
            return;
        }
        let bins = self.counts.len();
        let t = (volume - self.range.min) / self.range.width();
        let bin = ((t * bins as f64) as usize).min(bins - 1);
        self.counts[bin] += 1;
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Lower and upper edge of bin `i`.
    pub fn bin_edges(&self, i: usize) -> (f64, f64) {
        let step = self.range.width() / self.counts.len() as f64;
        let lo = self.range.min + step * i as f64;
        (lo, lo + step)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub class_counts: [usize; CLASS_COUNT],
    pub intersecting: usize,
    pub volume_histogram: VolumeHistogram,
}

impl DatasetSummary {
    fn new(range: VolumeRange, bins: usize) -> Self {
        Self {
            class_counts: [0; CLASS_COUNT],
            intersecting: 0,
            volume_histogram: VolumeHistogram::new(range, bins),
        }
    }

    fn record(&mut self, pair: &TetrahedronPair) {
        self.class_counts[pair.class().label() as usize] += 1;
        if pair.intersects() {
            self.intersecting += 1;
        }
        if pair.class() == IntersectionClass::Polyhedron {
            self.volume_histogram.record(pair.volume());
        }
    }

    pub fn total(&self) -> usize {
        self.class_counts.iter().sum()
    }

    fn log(&self) {
        for class in IntersectionClass::ALL {
            info!(%class, count = self.class_counts[class.label() as usize], "class total");
        }
        for (i, count) in self.volume_histogram.counts().iter().enumerate() {
            let (lo, hi) = self.volume_histogram.bin_edges(i);
            info!(bin = i, lo, hi, count, "polyhedron volume bin");
        }
    }
}

/// Fills a dataset with pairs in the configured class proportions.
pub struct DatasetDriver<K = ConvexKernel> {
    generator: PairGenerator<K>,
    config: DatasetConfig,
}

impl<K: GeometryKernel> DatasetDriver<K> {
    pub fn new(generator: PairGenerator<K>, config: DatasetConfig) -> Self {
        Self { generator, config }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn generator(&self) -> &PairGenerator<K> {
        &self.generator
    }

    /// Generate `dataset_size` records into `writer`.
    ///
    /// The writer is left open; call [`DatasetWriter::finish`] afterwards.
    #[instrument(skip_all, fields(size = self.config.dataset_size))]
    pub fn run<R: Rng + ?Sized>(
        &self,
        writer: &mut DatasetWriter,
        rng: &mut R,
    ) -> Result<DatasetSummary, DatasetError> {
        let total = self.config.dataset_size;
        let quotas = class_quotas(total, &self.config.intersection_distribution);
        info!(?quotas, "class quotas");

        let mut summary = DatasetSummary::new(self.config.volume_range, self.config.num_bins);
        let report_every = (total / 10).max(1);

        for (index, class) in ClassSchedule::new(quotas).enumerate() {
            let pair = self.next_pair(class, rng)?;
            let shape = if self.config.export_shape {
                self.generator
                    .kernel()
                    .intersection_vertices(pair.first(), pair.second())
            } else {
                Vec::new()
            };
            writer.write_entry(&pair, &shape)?;
            summary.record(&pair);

            let done = index + 1;
            if done % report_every == 0 || done == total {
                info!(done, total, percent = done * 100 / total, "progress");
            }
        }

        summary.log();
        Ok(summary)
    }

    /// Generate one pair of `class`, applying the volume filter to polyhedra.
    fn next_pair<R: Rng + ?Sized>(
        &self,
        class: IntersectionClass,
        rng: &mut R,
    ) -> Result<TetrahedronPair, DatasetError> {
        if class != IntersectionClass::Polyhedron {
            return Ok(self.generator.generate_pair(class, rng)?);
        }

        let range = self.config.volume_range;
        let mut rejections = 0;
        loop {
            let pair = self.generator.generate_pair(class, rng)?;
            if range.contains(pair.volume()) {
                return Ok(pair);
            }
            rejections += 1;
            debug!(volume = pair.volume(), rejections, "polyhedron volume out of range");
            if rejections >= self.config.max_volume_rejections {
                return Err(DatasetError::VolumeFilterExhausted { rejections });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        assert_eq!(class_quotas(1000, &[20.0; 5]), [200; 5]);
    }

    #[test]
    fn test_remainders_go_to_largest_fractions() {
        // Exact shares: 3.3, 3.3, 3.4, 0, 0 -> floors 3, 3, 3 and one left.
        let quotas = class_quotas(10, &[33.0, 33.0, 34.0, 0.0, 0.0]);
        assert_eq!(quotas, [3, 3, 4, 0, 0]);
    }

    #[test]
    fn test_ties_favour_lower_labels() {
        let quotas = class_quotas(7, &[20.0; 5]);
        assert_eq!(quotas, [2, 2, 1, 1, 1]);
    }

    #[test]
    fn test_quotas_sum_to_size() {
        let shares = [12.5, 7.25, 30.0, 0.25, 50.0];
        for size in [1, 3, 17, 99, 1001] {
            assert_eq!(class_quotas(size, &shares).iter().sum::<usize>(), size);
        }
    }

    #[test]
    fn test_schedule_round_robins_and_skips_empty() {
        use IntersectionClass as C;
        let order: Vec<_> = ClassSchedule::new([2, 0, 1, 0, 3]).collect();
        assert_eq!(
            order,
            vec![C::None, C::Segment, C::Polyhedron, C::None, C::Polyhedron, C::Polyhedron]
        );
    }

    #[test]
    fn test_histogram_bins() {
        let range = VolumeRange { min: 0.0, max: 0.2 };
        let mut hist = VolumeHistogram::new(range, 4);
        for v in [0.0, 0.01, 0.06, 0.12, 0.2, 0.25] {
            hist.record(v);
        }
        assert_eq!(hist.counts(), &[2, 1, 1, 1]);
        assert_eq!(hist.total(), 5);
        let (lo, hi) = hist.bin_edges(1);
        assert!((lo - 0.05).abs() < 1e-12 && (hi - 0.1).abs() < 1e-12);
    }
}
