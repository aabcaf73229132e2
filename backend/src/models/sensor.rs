use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily reading from the in-field sensor station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Calendar day of the reading, serialized as `YYYY-MM-DD`.
    pub timestamp: NaiveDate,
    pub soil_moisture: f64,
    pub air_temp: f64,
    pub humidity: f64,
    pub leaf_wetness: f64,
}

impl SensorRecord {
    /// Channel readings in [`SensorChannel::ALL`] order, without the timestamp.
    pub fn features(&self) -> [f64; 4] {
        SensorChannel::ALL.map(|channel| channel.value(self))
    }
}

/// Sensor channels tracked per record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorChannel {
    SoilMoisture,
    AirTemp,
    Humidity,
    LeafWetness,
}

impl SensorChannel {
    pub const ALL: [SensorChannel; 4] = [
        SensorChannel::SoilMoisture,
        SensorChannel::AirTemp,
        SensorChannel::Humidity,
        SensorChannel::LeafWetness,
    ];

    /// Column key, matching the record's serialized field name.
    pub fn key(&self) -> &'static str {
        match self {
            SensorChannel::SoilMoisture => "soil_moisture",
            SensorChannel::AirTemp => "air_temp",
            SensorChannel::Humidity => "humidity",
            SensorChannel::LeafWetness => "leaf_wetness",
        }
    }

    pub fn value(&self, record: &SensorRecord) -> f64 {
        match self {
            SensorChannel::SoilMoisture => record.soil_moisture,
            SensorChannel::AirTemp => record.air_temp,
            SensorChannel::Humidity => record.humidity,
            SensorChannel::LeafWetness => record.leaf_wetness,
        }
    }

    pub fn value_mut<'a>(&self, record: &'a mut SensorRecord) -> &'a mut f64 {
        match self {
            SensorChannel::SoilMoisture => &mut record.soil_moisture,
            SensorChannel::AirTemp => &mut record.air_temp,
            SensorChannel::Humidity => &mut record.humidity,
            SensorChannel::LeafWetness => &mut record.leaf_wetness,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SensorChannel::SoilMoisture => "Soil Moisture",
            SensorChannel::AirTemp => "Air Temperature",
            SensorChannel::Humidity => "Humidity",
            SensorChannel::LeafWetness => "Leaf Wetness",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SensorChannel::AirTemp => "°C",
            SensorChannel::SoilMoisture | SensorChannel::Humidity => "%",
            SensorChannel::LeafWetness => "",
        }
    }
}

/// Ordered daily records, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorSeries {
    records: Vec<SensorRecord>,
}

impl SensorSeries {
    pub fn new(records: Vec<SensorRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SensorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&SensorRecord> {
        self.records.last()
    }

    /// Record closest in time to `date`; the earlier record wins a tie.
    pub fn nearest(&self, date: NaiveDate) -> Option<&SensorRecord> {
        self.records
            .iter()
            .min_by_key(|r| (r.timestamp - date).num_days().abs())
    }

    /// First `n` records, used as the sample embedded in exports.
    pub fn sample(&self, n: usize) -> Vec<SensorRecord> {
        self.records.iter().take(n).cloned().collect()
    }
}

/// Current reading and observed range for one channel.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

/// Channel summaries over a whole series.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSummary {
    pub soil_moisture: ChannelSummary,
    pub air_temp: ChannelSummary,
    pub humidity: ChannelSummary,
    pub leaf_wetness: ChannelSummary,
}

impl SensorSummary {
    /// Summarize a series; `None` when the series has no records.
    pub fn from_series(series: &SensorSeries) -> Option<Self> {
        let latest = series.latest()?;
        let summarize = |channel: SensorChannel| {
            let (min, max) = series
                .records()
                .iter()
                .map(|r| channel.value(r))
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            ChannelSummary {
                current: channel.value(latest),
                min,
                max,
            }
        };

        Some(Self {
            soil_moisture: summarize(SensorChannel::SoilMoisture),
            air_temp: summarize(SensorChannel::AirTemp),
            humidity: summarize(SensorChannel::Humidity),
            leaf_wetness: summarize(SensorChannel::LeafWetness),
        })
    }

    pub fn channel(&self, channel: SensorChannel) -> &ChannelSummary {
        match channel {
            SensorChannel::SoilMoisture => &self.soil_moisture,
            SensorChannel::AirTemp => &self.air_temp,
            SensorChannel::Humidity => &self.humidity,
            SensorChannel::LeafWetness => &self.leaf_wetness,
        }
    }
}
