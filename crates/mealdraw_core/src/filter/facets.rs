//! Known facet options and preset filter panels per catalog.
//!
//! Option values match the tag vocabulary used by the catalog data, so they
//! stay in the data's language.

use crate::filter::group::{FilterGroup, FilterSet, TagSource};

pub const GROUP_MEAL: &str = "meal";
pub const GROUP_GOAL: &str = "goal";
pub const GROUP_DIET: &str = "diet";
pub const GROUP_ALLERGEN: &str = "allergen";
pub const GROUP_LOCATION: &str = "location";
pub const GROUP_TYPE: &str = "type";
pub const GROUP_INTENSITY: &str = "intensity";

/// Diet habit that means "no diet restriction".
pub const GENERAL_DIET: &str = "一般飲食";

/// Meal types (single-select).
pub const MEAL_TYPES: &[&str] = &["早餐", "早午餐", "午餐", "點心", "晚餐"];

/// Health goals (multi-select inclusion).
pub const HEALTH_GOALS: &[&str] = &[
    "減脂",
    "增肌",
    "高蛋白",
    "低碳水",
    "高纖維",
    "控糖飲食",
    "降膽固醇",
    "低鈉飲食",
    "美肌養顏",
    "促進腸胃健康",
    "提升專注力",
    "增進睡眠品質",
];

/// Diet habits (single-select). The first entry is the wildcard.
pub const DIET_HABITS: &[&str] = &[
    GENERAL_DIET,
    "全素",
    "蛋奶素",
    "魚素",
    "地中海飲食",
    "原型食物飲食",
    "生酮飲食",
];

/// Allergens (multi-select exclusion).
pub const ALLERGENS: &[&str] = &[
    "花生",
    "堅果",
    "乳製品",
    "雞蛋",
    "大豆",
    "小麥",
    "魚類",
    "甲殼類",
    "軟體動物",
    "芒果",
    "奇異果",
    "麩質",
    "雞肉",
    "牛肉",
    "豬肉",
];

/// Taichung districts (single-select).
pub const LOCATIONS: &[&str] = &[
    "霧峰區",
    "大里區",
    "太平區",
    "東區",
    "南區",
    "中區",
    "西區",
    "北區",
    "南屯區",
    "西屯區",
    "北屯區",
];

/// Restaurant categories (single-select).
pub const RESTAURANT_TYPES: &[&str] = &["沙拉", "輕食/健康餐盒", "健康早午餐", "點心"];

/// Exercise intensities (multi-select inclusion).
pub const INTENSITIES: &[&str] = &["低", "中", "高"];

/// Recipe panel: meal, goal, diet (with general-diet wildcard), allergen.
pub fn recipe_filters() -> FilterSet {
    FilterSet::new()
        .with(FilterGroup::single(GROUP_MEAL, TagSource::Tags))
        .with(FilterGroup::include(GROUP_GOAL, TagSource::Tags))
        .with(FilterGroup::single(GROUP_DIET, TagSource::Tags).with_wildcard(GENERAL_DIET))
        .with(FilterGroup::exclude(GROUP_ALLERGEN, TagSource::Tags))
}

/// Restaurant panel: district and category, both single-select.
pub fn restaurant_filters() -> FilterSet {
    FilterSet::new()
        .with(FilterGroup::single(GROUP_LOCATION, TagSource::Location))
        .with(FilterGroup::single(GROUP_TYPE, TagSource::Kind))
}

/// Exercise panel: intensity, multi-select inclusion.
pub fn sport_filters() -> FilterSet {
    FilterSet::new().with(FilterGroup::include(GROUP_INTENSITY, TagSource::Intensity))
}

/// Known option list for a group name, if the group has a fixed vocabulary.
pub fn options_for(group: &str) -> Option<&'static [&'static str]> {
    match group {
        GROUP_MEAL => Some(MEAL_TYPES),
        GROUP_GOAL => Some(HEALTH_GOALS),
        GROUP_DIET => Some(DIET_HABITS),
        GROUP_ALLERGEN => Some(ALLERGENS),
        GROUP_LOCATION => Some(LOCATIONS),
        GROUP_TYPE => Some(RESTAURANT_TYPES),
        GROUP_INTENSITY => Some(INTENSITIES),
        _ => None,
    }
}
