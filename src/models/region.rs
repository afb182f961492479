use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub id: String,
    pub name: String,
    /// Share of pharmacies with stock, 0..=100.
    pub availability: u8,
    pub pharmacies: u32,
    pub main_meds: Vec<String>,
    pub shortages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacyListing {
    pub id: u32,
    pub name: String,
    pub region: String,
    pub distance_km: f64,
    pub rating: f64,
    /// Free-form summary like "Amoxicillin (156), Metformin (245)".
    pub stock: String,
    pub hours: String,
    pub phone: String,
}
