// Air-quality classification bands, highest first.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AirQualityBand {
    Excellent,
    Good,
    Moderate,
    Poor,
    Hazardous,
}

impl AirQualityBand {
    pub fn label(self) -> &'static str {
        match self {
            AirQualityBand::Excellent => "Excellent",
            AirQualityBand::Good => "Good",
            AirQualityBand::Moderate => "Moderate",
            AirQualityBand::Poor => "Poor",
            AirQualityBand::Hazardous => "Hazardous",
        }
    }

    /// 0 for Excellent up to 4 for Hazardous.
    pub fn severity_tier(self) -> u8 {
        match self {
            AirQualityBand::Excellent => 0,
            AirQualityBand::Good => 1,
            AirQualityBand::Moderate => 2,
            AirQualityBand::Poor => 3,
            AirQualityBand::Hazardous => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityStatus {
    pub band: AirQualityBand,
    pub label: &'static str,
    pub severity_tier: u8,
}

impl From<AirQualityBand> for AirQualityStatus {
    fn from(band: AirQualityBand) -> Self {
        Self {
            band,
            label: band.label(),
            severity_tier: band.severity_tier(),
        }
    }
}
