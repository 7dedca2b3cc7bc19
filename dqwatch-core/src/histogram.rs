//! Reference binned stores: 1-D histogram and 1-D profile.
//!
//! Both keep moment accumulators next to the bin arrays so summary
//! statistics are O(1) reads, and both snapshot their whole accumulator
//! block for soft reset: adjusted reads subtract the snapshot field by
//! field.

use std::collections::BTreeMap;

use dqwatch_types::{Axis, BinIndex};

use crate::error::DqmError;
use crate::store::ContentStore;

/// Weighted first and second moments of a sample stream.
#[derive(Debug, Clone, Copy, Default)]
struct Moments {
    sumw: f64,
    sumwx: f64,
    sumwx2: f64,
}

impl Moments {
    fn record(&mut self, x: f64, w: f64) {
        self.sumw += w;
        self.sumwx += w * x;
        self.sumwx2 += w * x * x;
    }

    fn minus(&self, base: &Moments) -> Moments {
        Moments {
            sumw: self.sumw - base.sumw,
            sumwx: self.sumwx - base.sumwx,
            sumwx2: self.sumwx2 - base.sumwx2,
        }
    }

    fn mean(&self) -> f64 {
        if self.sumw == 0.0 {
            0.0
        } else {
            self.sumwx / self.sumw
        }
    }

    fn rms(&self) -> f64 {
        if self.sumw == 0.0 {
            0.0
        } else {
            let mean = self.mean();
            (self.sumwx2 / self.sumw - mean * mean).max(0.0).sqrt()
        }
    }
}

#[derive(Debug, Clone)]
struct HistData {
    bins: Vec<f64>,
    sumw2: Vec<f64>,
    underflow: f64,
    overflow: f64,
    entries: f64,
    stats: Moments,
}

impl HistData {
    fn new(nbins: usize) -> Self {
        Self {
            bins: vec![0.0; nbins],
            sumw2: vec![0.0; nbins],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0.0,
            stats: Moments::default(),
        }
    }
}

/// Fixed-binning 1-D histogram with under/overflow counters.
///
/// `fill(x)` adds a unit-weight sample; `fill2(x, w)` adds a weighted
/// one. Mean and RMS come from moment accumulators over in-range
/// samples; bin errors from per-bin sums of squared weights.
#[derive(Debug, Clone)]
pub struct Hist1d {
    nbins: usize,
    x_min: f64,
    x_max: f64,
    data: HistData,
    baseline: Option<HistData>,
    labels: BTreeMap<usize, String>,
    view_range: Option<(f64, f64)>,
}

impl Hist1d {
    /// Create a histogram with `nbins` equal bins over `[x_min, x_max)`.
    ///
    /// # Panics
    ///
    /// Panics if `nbins` is zero or `x_max <= x_min`.
    pub fn new(nbins: usize, x_min: f64, x_max: f64) -> Self {
        assert!(nbins > 0, "histogram needs at least one bin");
        assert!(x_max > x_min, "histogram range must be non-empty");
        Self {
            nbins,
            x_min,
            x_max,
            data: HistData::new(nbins),
            baseline: None,
            labels: BTreeMap::new(),
            view_range: None,
        }
    }

    /// Number of bins.
    pub fn nbins(&self) -> usize {
        self.nbins
    }

    /// Label of one bin, if set.
    pub fn bin_label(&self, bin: usize) -> Option<&str> {
        self.labels.get(&bin).map(String::as_str)
    }

    /// Displayed x range, if restricted.
    pub fn axis_range(&self) -> Option<(f64, f64)> {
        self.view_range
    }

    /// Underflow weight (baseline-adjusted).
    pub fn underflow(&self) -> f64 {
        self.data.underflow - self.base().map_or(0.0, |b| b.underflow)
    }

    /// Overflow weight (baseline-adjusted).
    pub fn overflow(&self) -> f64 {
        self.data.overflow - self.base().map_or(0.0, |b| b.overflow)
    }

    fn base(&self) -> Option<&HistData> {
        self.baseline.as_ref()
    }

    fn adjusted_stats(&self) -> Moments {
        match self.base() {
            Some(b) => self.data.stats.minus(&b.stats),
            None => self.data.stats,
        }
    }

    fn check_bin(&self, bin: BinIndex) -> Result<usize, DqmError> {
        match bin {
            BinIndex::D1(i) if i >= 1 && i <= self.nbins => Ok(i - 1),
            _ => Err(DqmError::BinOutOfRange {
                bin,
                nbins: self.nbins,
                kind: "hist1d",
            }),
        }
    }

    fn check_axis(&self, axis: Axis) -> Result<(), DqmError> {
        match axis {
            Axis::X => Ok(()),
            _ => Err(DqmError::AxisOutOfRange {
                axis,
                kind: "hist1d",
            }),
        }
    }

    fn fill_weighted(&mut self, x: f64, w: f64) {
        self.data.entries += 1.0;
        if x < self.x_min {
            self.data.underflow += w;
        } else if x >= self.x_max {
            self.data.overflow += w;
        } else {
            let width = (self.x_max - self.x_min) / self.nbins as f64;
            let idx = (((x - self.x_min) / width) as usize).min(self.nbins - 1);
            self.data.bins[idx] += w;
            self.data.sumw2[idx] += w * w;
            self.data.stats.record(x, w);
        }
    }
}

impl ContentStore for Hist1d {
    fn kind(&self) -> &'static str {
        "hist1d"
    }

    fn fill(&mut self, x: f64) -> Result<(), DqmError> {
        self.fill_weighted(x, 1.0);
        Ok(())
    }

    fn fill2(&mut self, x: f64, w: f64) -> Result<(), DqmError> {
        self.fill_weighted(x, w);
        Ok(())
    }

    fn fill3(&mut self, _x: f64, _y: f64, _z: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill3", "hist1d"))
    }

    fn fill4(&mut self, _x: f64, _y: f64, _z: f64, _w: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill4", "hist1d"))
    }

    fn fill_text(&mut self, _value: &str) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill_text", "hist1d"))
    }

    fn value_string(&self) -> Result<String, DqmError> {
        Err(DqmError::unsupported("value_string", "hist1d"))
    }

    fn mean(&self, axis: Axis) -> Result<f64, DqmError> {
        self.check_axis(axis)?;
        Ok(self.adjusted_stats().mean())
    }

    fn mean_error(&self, axis: Axis) -> Result<f64, DqmError> {
        self.check_axis(axis)?;
        let entries = self.entries();
        if entries <= 0.0 {
            return Ok(0.0);
        }
        Ok(self.adjusted_stats().rms() / entries.sqrt())
    }

    fn rms(&self, axis: Axis) -> Result<f64, DqmError> {
        self.check_axis(axis)?;
        Ok(self.adjusted_stats().rms())
    }

    fn rms_error(&self, axis: Axis) -> Result<f64, DqmError> {
        self.check_axis(axis)?;
        let entries = self.entries();
        if entries <= 0.0 {
            return Ok(0.0);
        }
        Ok(self.adjusted_stats().rms() / (2.0 * entries).sqrt())
    }

    fn bin_content(&self, bin: BinIndex) -> Result<f64, DqmError> {
        let idx = self.check_bin(bin)?;
        let base = self.base().map_or(0.0, |b| b.bins[idx]);
        Ok(self.data.bins[idx] - base)
    }

    fn bin_error(&self, bin: BinIndex) -> Result<f64, DqmError> {
        let idx = self.check_bin(bin)?;
        let base = self.base().map_or(0.0, |b| b.sumw2[idx]);
        Ok((self.data.sumw2[idx] - base).max(0.0).sqrt())
    }

    fn set_bin_content(&mut self, bin: BinIndex, value: f64) -> Result<(), DqmError> {
        let idx = self.check_bin(bin)?;
        self.data.bins[idx] = value;
        Ok(())
    }

    fn set_bin_error(&mut self, bin: BinIndex, error: f64) -> Result<(), DqmError> {
        let idx = self.check_bin(bin)?;
        self.data.sumw2[idx] = error * error;
        Ok(())
    }

    fn entries(&self) -> f64 {
        self.data.entries - self.base().map_or(0.0, |b| b.entries)
    }

    fn set_entries(&mut self, entries: f64) {
        self.data.entries = entries;
    }

    fn bin_entries(&self, _bin: usize) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("bin_entries", "hist1d"))
    }

    fn y_min(&self) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("y_min", "hist1d"))
    }

    fn y_max(&self) -> Result<f64, DqmError> {
        Err(DqmError::unsupported("y_max", "hist1d"))
    }

    fn set_bin_label(&mut self, bin: usize, label: &str, axis: Axis) -> Result<(), DqmError> {
        self.check_axis(axis)?;
        self.check_bin(BinIndex::D1(bin))?;
        self.labels.insert(bin, label.to_string());
        Ok(())
    }

    fn set_axis_range(&mut self, min: f64, max: f64, axis: Axis) -> Result<(), DqmError> {
        self.check_axis(axis)?;
        self.view_range = Some((min, max));
        Ok(())
    }

    fn reset(&mut self) {
        self.data = HistData::new(self.nbins);
    }

    fn take_baseline(&mut self) {
        self.baseline = Some(self.data.clone());
    }

    fn clear_baseline(&mut self) {
        self.baseline = None;
    }
}

#[derive(Debug, Clone)]
struct ProfData {
    count: Vec<f64>,
    sum_y: Vec<f64>,
    sum_y2: Vec<f64>,
    entries: f64,
    x_stats: Moments,
    y_stats: Moments,
}

impl ProfData {
    fn new(nbins: usize) -> Self {
        Self {
            count: vec![0.0; nbins],
            sum_y: vec![0.0; nbins],
            sum_y2: vec![0.0; nbins],
            entries: 0.0,
            x_stats: Moments::default(),
            y_stats: Moments::default(),
        }
    }
}

/// 1-D profile: per-bin mean and spread of a dependent y value.
///
/// `fill2(x, y)` adds a sample; `fill3(x, y, w)` a weighted one. Bin
/// content is the mean y of the bin, bin error the uncertainty on that
/// mean. Samples with x outside the binning, or y outside the optional
/// y limits, are dropped.
#[derive(Debug, Clone)]
pub struct Profile1d {
    nbins: usize,
    x_min: f64,
    x_max: f64,
    y_limits: Option<(f64, f64)>,
    data: ProfData,
    baseline: Option<ProfData>,
    labels: BTreeMap<usize, String>,
    view_range: Option<(f64, f64)>,
}

impl Profile1d {
    /// Create a profile with `nbins` equal bins over `[x_min, x_max)`.
    ///
    /// # Panics
    ///
    /// Panics if `nbins` is zero or `x_max <= x_min`.
    pub fn new(nbins: usize, x_min: f64, x_max: f64) -> Self {
        assert!(nbins > 0, "profile needs at least one bin");
        assert!(x_max > x_min, "profile range must be non-empty");
        Self {
            nbins,
            x_min,
            x_max,
            y_limits: None,
            data: ProfData::new(nbins),
            baseline: None,
            labels: BTreeMap::new(),
            view_range: None,
        }
    }

    /// Restrict accepted y values to `[y_min, y_max]`.
    pub fn with_y_limits(mut self, y_min: f64, y_max: f64) -> Self {
        self.y_limits = Some((y_min, y_max));
        self
    }

    /// Number of bins.
    pub fn nbins(&self) -> usize {
        self.nbins
    }

    /// Label of one bin, if set.
    pub fn bin_label(&self, bin: usize) -> Option<&str> {
        self.labels.get(&bin).map(String::as_str)
    }

    /// Displayed x range, if restricted.
    pub fn axis_range(&self) -> Option<(f64, f64)> {
        self.view_range
    }

    fn base(&self) -> Option<&ProfData> {
        self.baseline.as_ref()
    }

    fn check_bin(&self, bin: BinIndex) -> Result<usize, DqmError> {
        match bin {
            BinIndex::D1(i) if i >= 1 && i <= self.nbins => Ok(i - 1),
            _ => Err(DqmError::BinOutOfRange {
                bin,
                nbins: self.nbins,
                kind: "profile1d",
            }),
        }
    }

    fn stats_for(&self, axis: Axis) -> Result<Moments, DqmError> {
        let (current, base) = match axis {
            Axis::X => (self.data.x_stats, self.base().map(|b| b.x_stats)),
            Axis::Y => (self.data.y_stats, self.base().map(|b| b.y_stats)),
            Axis::Z => {
                return Err(DqmError::AxisOutOfRange {
                    axis,
                    kind: "profile1d",
                })
            }
        };
        Ok(match base {
            Some(b) => current.minus(&b),
            None => current,
        })
    }

    fn fill_weighted(&mut self, x: f64, y: f64, w: f64) {
        if let Some((lo, hi)) = self.y_limits {
            if y < lo || y > hi {
                return;
            }
        }
        if x < self.x_min || x >= self.x_max {
            return;
        }
        let width = (self.x_max - self.x_min) / self.nbins as f64;
        let idx = (((x - self.x_min) / width) as usize).min(self.nbins - 1);
        self.data.count[idx] += w;
        self.data.sum_y[idx] += w * y;
        self.data.sum_y2[idx] += w * y * y;
        self.data.entries += 1.0;
        self.data.x_stats.record(x, w);
        self.data.y_stats.record(y, w);
    }

    fn bin_terms(&self, idx: usize) -> (f64, f64, f64) {
        let (bc, bs, bs2) = match self.base() {
            Some(b) => (b.count[idx], b.sum_y[idx], b.sum_y2[idx]),
            None => (0.0, 0.0, 0.0),
        };
        (
            self.data.count[idx] - bc,
            self.data.sum_y[idx] - bs,
            self.data.sum_y2[idx] - bs2,
        )
    }
}

impl ContentStore for Profile1d {
    fn kind(&self) -> &'static str {
        "profile1d"
    }

    fn fill(&mut self, _x: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill", "profile1d"))
    }

    fn fill2(&mut self, x: f64, y: f64) -> Result<(), DqmError> {
        self.fill_weighted(x, y, 1.0);
        Ok(())
    }

    fn fill3(&mut self, x: f64, y: f64, w: f64) -> Result<(), DqmError> {
        self.fill_weighted(x, y, w);
        Ok(())
    }

    fn fill4(&mut self, _x: f64, _y: f64, _z: f64, _w: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill4", "profile1d"))
    }

    fn fill_text(&mut self, _value: &str) -> Result<(), DqmError> {
        Err(DqmError::unsupported("fill_text", "profile1d"))
    }

    fn value_string(&self) -> Result<String, DqmError> {
        Err(DqmError::unsupported("value_string", "profile1d"))
    }

    fn mean(&self, axis: Axis) -> Result<f64, DqmError> {
        Ok(self.stats_for(axis)?.mean())
    }

    fn mean_error(&self, axis: Axis) -> Result<f64, DqmError> {
        let stats = self.stats_for(axis)?;
        let entries = self.entries();
        if entries <= 0.0 {
            return Ok(0.0);
        }
        Ok(stats.rms() / entries.sqrt())
    }

    fn rms(&self, axis: Axis) -> Result<f64, DqmError> {
        Ok(self.stats_for(axis)?.rms())
    }

    fn rms_error(&self, axis: Axis) -> Result<f64, DqmError> {
        let stats = self.stats_for(axis)?;
        let entries = self.entries();
        if entries <= 0.0 {
            return Ok(0.0);
        }
        Ok(stats.rms() / (2.0 * entries).sqrt())
    }

    fn bin_content(&self, bin: BinIndex) -> Result<f64, DqmError> {
        let idx = self.check_bin(bin)?;
        let (count, sum_y, _) = self.bin_terms(idx);
        if count <= 0.0 {
            return Ok(0.0);
        }
        Ok(sum_y / count)
    }

    fn bin_error(&self, bin: BinIndex) -> Result<f64, DqmError> {
        let idx = self.check_bin(bin)?;
        let (count, sum_y, sum_y2) = self.bin_terms(idx);
        if count <= 0.0 {
            return Ok(0.0);
        }
        let mean = sum_y / count;
        let var = (sum_y2 / count - mean * mean).max(0.0);
        Ok((var / count).sqrt())
    }

    fn set_bin_content(&mut self, _bin: BinIndex, _value: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_bin_content", "profile1d"))
    }

    fn set_bin_error(&mut self, _bin: BinIndex, _error: f64) -> Result<(), DqmError> {
        Err(DqmError::unsupported("set_bin_error", "profile1d"))
    }

    fn entries(&self) -> f64 {
        self.data.entries - self.base().map_or(0.0, |b| b.entries)
    }

    fn set_entries(&mut self, entries: f64) {
        self.data.entries = entries;
    }

    fn bin_entries(&self, bin: usize) -> Result<f64, DqmError> {
        let idx = self.check_bin(BinIndex::D1(bin))?;
        let (count, _, _) = self.bin_terms(idx);
        Ok(count)
    }

    fn y_min(&self) -> Result<f64, DqmError> {
        self.y_limits
            .map(|(lo, _)| lo)
            .ok_or(DqmError::unsupported("y_min", "profile1d"))
    }

    fn y_max(&self) -> Result<f64, DqmError> {
        self.y_limits
            .map(|(_, hi)| hi)
            .ok_or(DqmError::unsupported("y_max", "profile1d"))
    }

    fn set_bin_label(&mut self, bin: usize, label: &str, axis: Axis) -> Result<(), DqmError> {
        match axis {
            Axis::X => {
                self.check_bin(BinIndex::D1(bin))?;
                self.labels.insert(bin, label.to_string());
                Ok(())
            }
            _ => Err(DqmError::AxisOutOfRange {
                axis,
                kind: "profile1d",
            }),
        }
    }

    fn set_axis_range(&mut self, min: f64, max: f64, axis: Axis) -> Result<(), DqmError> {
        match axis {
            Axis::X => {
                self.view_range = Some((min, max));
                Ok(())
            }
            Axis::Y => {
                self.y_limits = Some((min, max));
                Ok(())
            }
            Axis::Z => Err(DqmError::AxisOutOfRange {
                axis,
                kind: "profile1d",
            }),
        }
    }

    fn reset(&mut self) {
        self.data = ProfData::new(self.nbins);
    }

    fn take_baseline(&mut self) {
        self.baseline = Some(self.data.clone());
    }

    fn clear_baseline(&mut self) {
        self.baseline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_hist() -> Hist1d {
        let mut h = Hist1d::new(10, 0.0, 10.0);
        for x in [0.5, 1.5, 1.5, 4.5, 9.5] {
            h.fill(x).unwrap();
        }
        h
    }

    #[test]
    fn fill_routes_to_bins() {
        let h = filled_hist();
        assert_eq!(h.entries(), 5.0);
        assert_eq!(h.bin_content(BinIndex::D1(1)).unwrap(), 1.0);
        assert_eq!(h.bin_content(BinIndex::D1(2)).unwrap(), 2.0);
        assert_eq!(h.bin_content(BinIndex::D1(5)).unwrap(), 1.0);
        assert_eq!(h.bin_content(BinIndex::D1(10)).unwrap(), 1.0);
    }

    #[test]
    fn out_of_range_fills_go_to_under_overflow() {
        let mut h = Hist1d::new(4, 0.0, 4.0);
        h.fill(-1.0).unwrap();
        h.fill(7.0).unwrap();
        h.fill(4.0).unwrap(); // upper edge is exclusive

        assert_eq!(h.underflow(), 1.0);
        assert_eq!(h.overflow(), 2.0);
        assert_eq!(h.entries(), 3.0);
        assert_eq!(h.mean(Axis::X).unwrap(), 0.0); // no in-range samples
    }

    #[test]
    fn weighted_fill_and_bin_error() {
        let mut h = Hist1d::new(2, 0.0, 2.0);
        h.fill2(0.5, 3.0).unwrap();
        h.fill2(0.5, 4.0).unwrap();

        assert_eq!(h.bin_content(BinIndex::D1(1)).unwrap(), 7.0);
        assert_eq!(h.bin_error(BinIndex::D1(1)).unwrap(), 25.0_f64.sqrt());
    }

    #[test]
    fn mean_and_rms_from_moments() {
        let mut h = Hist1d::new(10, 0.0, 10.0);
        h.fill(2.0).unwrap();
        h.fill(4.0).unwrap();

        assert!((h.mean(Axis::X).unwrap() - 3.0).abs() < 1e-12);
        assert!((h.rms(Axis::X).unwrap() - 1.0).abs() < 1e-12);
        assert!(h.mean(Axis::Y).is_err());
    }

    #[test]
    fn bin_bounds_are_checked() {
        let mut h = Hist1d::new(3, 0.0, 3.0);
        assert!(h.bin_content(BinIndex::D1(0)).is_err());
        assert!(h.bin_content(BinIndex::D1(4)).is_err());
        assert!(h.bin_content(BinIndex::D2(1, 1)).is_err());
        assert!(h.set_bin_content(BinIndex::D1(4), 1.0).is_err());
    }

    #[test]
    fn set_bin_content_overwrites() {
        let mut h = Hist1d::new(3, 0.0, 3.0);
        h.set_bin_content(BinIndex::D1(2), 12.5).unwrap();
        assert_eq!(h.bin_content(BinIndex::D1(2)).unwrap(), 12.5);

        h.set_bin_error(BinIndex::D1(2), 0.5).unwrap();
        assert_eq!(h.bin_error(BinIndex::D1(2)).unwrap(), 0.5);
    }

    #[test]
    fn baseline_subtracts_everything() {
        let mut h = filled_hist();
        h.take_baseline();

        assert_eq!(h.entries(), 0.0);
        assert_eq!(h.bin_content(BinIndex::D1(2)).unwrap(), 0.0);
        assert_eq!(h.mean(Axis::X).unwrap(), 0.0);

        h.fill(1.5).unwrap();
        assert_eq!(h.entries(), 1.0);
        assert_eq!(h.bin_content(BinIndex::D1(2)).unwrap(), 1.0);
        assert!((h.mean(Axis::X).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn baseline_roundtrip_restores_raw_reads() {
        let mut h = filled_hist();
        let entries = h.entries();
        let mean = h.mean(Axis::X).unwrap();
        let bin2 = h.bin_content(BinIndex::D1(2)).unwrap();

        h.take_baseline();
        h.clear_baseline();

        assert_eq!(h.entries(), entries);
        assert_eq!(h.mean(Axis::X).unwrap(), mean);
        assert_eq!(h.bin_content(BinIndex::D1(2)).unwrap(), bin2);
    }

    #[test]
    fn reset_keeps_labels_and_range() {
        let mut h = filled_hist();
        h.set_bin_label(1, "low", Axis::X).unwrap();
        h.set_axis_range(0.0, 5.0, Axis::X).unwrap();

        h.reset();
        assert_eq!(h.entries(), 0.0);
        assert_eq!(h.bin_content(BinIndex::D1(2)).unwrap(), 0.0);
        assert_eq!(h.bin_label(1), Some("low"));
        assert_eq!(h.axis_range(), Some((0.0, 5.0)));
    }

    #[test]
    fn profile_bin_content_is_mean_y() {
        let mut p = Profile1d::new(4, 0.0, 4.0);
        p.fill2(0.5, 10.0).unwrap();
        p.fill2(0.5, 14.0).unwrap();
        p.fill2(2.5, 3.0).unwrap();

        assert_eq!(p.bin_content(BinIndex::D1(1)).unwrap(), 12.0);
        assert_eq!(p.bin_entries(1).unwrap(), 2.0);
        assert_eq!(p.bin_content(BinIndex::D1(3)).unwrap(), 3.0);
        assert_eq!(p.bin_content(BinIndex::D1(2)).unwrap(), 0.0); // empty bin
        assert_eq!(p.entries(), 3.0);
    }

    #[test]
    fn profile_y_limits_drop_samples() {
        let mut p = Profile1d::new(2, 0.0, 2.0).with_y_limits(0.0, 100.0);
        p.fill2(0.5, 50.0).unwrap();
        p.fill2(0.5, 500.0).unwrap(); // dropped

        assert_eq!(p.entries(), 1.0);
        assert_eq!(p.bin_content(BinIndex::D1(1)).unwrap(), 50.0);
        assert_eq!(p.y_min().unwrap(), 0.0);
        assert_eq!(p.y_max().unwrap(), 100.0);
    }

    #[test]
    fn profile_without_y_limits_rejects_getters() {
        let p = Profile1d::new(2, 0.0, 2.0);
        assert!(p.y_min().is_err());
        assert!(p.y_max().is_err());
    }

    #[test]
    fn profile_axis_stats() {
        let mut p = Profile1d::new(10, 0.0, 10.0);
        p.fill2(2.0, 5.0).unwrap();
        p.fill2(4.0, 15.0).unwrap();

        assert!((p.mean(Axis::X).unwrap() - 3.0).abs() < 1e-12);
        assert!((p.mean(Axis::Y).unwrap() - 10.0).abs() < 1e-12);
        assert!((p.rms(Axis::Y).unwrap() - 5.0).abs() < 1e-12);
        assert!(p.mean(Axis::Z).is_err());
    }

    #[test]
    fn profile_weighted_fill() {
        let mut p = Profile1d::new(1, 0.0, 1.0);
        p.fill3(0.5, 10.0, 3.0).unwrap();
        p.fill3(0.5, 20.0, 1.0).unwrap();

        // weighted mean: (3*10 + 1*20) / 4
        assert!((p.bin_content(BinIndex::D1(1)).unwrap() - 12.5).abs() < 1e-12);
        assert_eq!(p.bin_entries(1).unwrap(), 4.0);
    }

    #[test]
    fn profile_baseline_roundtrip() {
        let mut p = Profile1d::new(2, 0.0, 2.0);
        p.fill2(0.5, 8.0).unwrap();

        p.take_baseline();
        assert_eq!(p.entries(), 0.0);
        assert_eq!(p.bin_content(BinIndex::D1(1)).unwrap(), 0.0);

        p.fill2(0.5, 4.0).unwrap();
        assert_eq!(p.bin_content(BinIndex::D1(1)).unwrap(), 4.0);

        p.clear_baseline();
        assert_eq!(p.entries(), 2.0);
        assert_eq!(p.bin_content(BinIndex::D1(1)).unwrap(), 6.0);
    }

    #[test]
    fn profile_set_axis_range_y_sets_limits() {
        let mut p = Profile1d::new(2, 0.0, 2.0);
        p.set_axis_range(-5.0, 5.0, Axis::Y).unwrap();
        assert_eq!(p.y_min().unwrap(), -5.0);
        assert_eq!(p.y_max().unwrap(), 5.0);
        assert!(p.set_axis_range(0.0, 1.0, Axis::Z).is_err());
    }
}
