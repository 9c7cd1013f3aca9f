//! Geographic job distribution payload and map helpers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One sector slice of a region's pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorCount {
    pub name: String,
    pub value: u32,
}

/// Aggregated placements for one region (province or city).
///
/// `coord` is a `"lng,lat"` string as delivered by the gateway; use
/// [`parse_coord`] rather than splitting it ad hoc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAggregate {
    pub name: String,
    #[serde(default)]
    pub coord: Option<String>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub data: Vec<SectorCount>,
    /// Cities contained in this region, present on province-level entries
    #[serde(default)]
    pub city_names: Vec<String>,
}

/// Full distribution payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDistribution {
    #[serde(default)]
    pub province_data: Vec<RegionAggregate>,
    #[serde(default)]
    pub city_details_map: HashMap<String, RegionAggregate>,
}

impl JobDistribution {
    /// Resolves the drill-down city entries for a province.
    ///
    /// Missing city detail records and records without a plottable
    /// coordinate are silently dropped; the map renders what remains.
    pub fn city_drilldown(&self, province: &str) -> Vec<&RegionAggregate> {
        let Some(entry) = self.province_data.iter().find(|p| p.name == province) else {
            return Vec::new();
        };
        entry
            .city_names
            .iter()
            .filter_map(|city| self.city_details_map.get(city))
            .filter(|city| city.coord.as_deref().and_then(parse_coord).is_some())
            .collect()
    }
}

/// Parses a `"lng,lat"` coordinate string, tolerating whitespace.
/// Malformed input yields `None`, never a panic.
pub fn parse_coord(raw: &str) -> Option<(f64, f64)> {
    let (lng, lat) = raw.split_once(',')?;
    Some((lng.trim().parse().ok()?, lat.trim().parse().ok()?))
}

/// Maps a province display name to the lowercase pinyin slug of its local
/// GeoJSON asset (`"北京"` -> `"beijing"` -> `beijing.json`).
pub fn province_geo_slug(name: &str) -> Option<&'static str> {
    PROVINCE_GEO_SLUGS
        .iter()
        .find(|(province, _)| *province == name)
        .map(|(_, slug)| *slug)
}

const PROVINCE_GEO_SLUGS: [(&str, &str); 34] = [
    // municipalities
    ("北京", "beijing"),
    ("上海", "shanghai"),
    ("天津", "tianjin"),
    ("重庆", "chongqing"),
    // autonomous regions
    ("内蒙古", "neimenggu"),
    ("广西", "guangxi"),
    ("西藏", "xizang"),
    ("宁夏", "ningxia"),
    ("新疆", "xinjiang"),
    // special administrative regions
    ("香港", "xianggang"),
    ("澳门", "aomen"),
    // provinces
    ("河北", "hebei"),
    ("山西", "shanxi"),
    ("辽宁", "liaoning"),
    ("吉林", "jilin"),
    ("黑龙江", "heilongjiang"),
    ("江苏", "jiangsu"),
    ("浙江", "zhejiang"),
    ("安徽", "anhui"),
    ("福建", "fujian"),
    ("江西", "jiangxi"),
    ("山东", "shandong"),
    ("河南", "henan"),
    ("湖北", "hubei"),
    ("湖南", "hunan"),
    ("广东", "guangdong"),
    ("海南", "hainan"),
    ("四川", "sichuan"),
    ("贵州", "guizhou"),
    ("云南", "yunnan"),
    ("陕西", "shaanxi"),
    ("甘肃", "gansu"),
    ("青海", "qinghai"),
    ("台湾", "taiwan"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn region(name: &str, coord: Option<&str>) -> RegionAggregate {
        RegionAggregate {
            name: name.to_string(),
            coord: coord.map(str::to_string),
            total: 10,
            data: vec![],
            city_names: vec![],
        }
    }

    #[test]
    fn test_parse_coord_tolerates_whitespace() {
        assert_eq!(parse_coord("113.26, 23.13"), Some((113.26, 23.13)));
        assert_eq!(parse_coord("garbage"), None);
        assert_eq!(parse_coord("1,two"), None);
    }

    #[test]
    fn test_city_drilldown_drops_missing_and_unplottable() {
        let mut province = region("广东", None);
        province.city_names = vec![
            "广州".to_string(),
            "深圳".to_string(),
            "unknown".to_string(),
        ];
        let mut city_details_map = HashMap::new();
        city_details_map.insert("广州".to_string(), region("广州", Some("113.26,23.13")));
        city_details_map.insert("深圳".to_string(), region("深圳", Some("bad")));

        let distribution = JobDistribution {
            province_data: vec![province],
            city_details_map,
        };

        let cities = distribution.city_drilldown("广东");
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "广州");
        assert!(distribution.city_drilldown("不存在").is_empty());
    }

    #[test]
    fn test_province_geo_slug_lookup() {
        assert_eq!(province_geo_slug("黑龙江"), Some("heilongjiang"));
        assert_eq!(province_geo_slug("Atlantis"), None);
    }
}
