// ==========================================
// HTS 关税计算系统 - 原产国 (Country of Origin)
// ==========================================
// 职责: 原产国闭合集合；未列出的国家是显式错误，而非自由文本
// ==========================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 可选原产国列表（China 固定在首位）
pub const COUNTRIES: [&str; 194] = [
    "China", "USA", "Italy", "Germany", "France", "Afghanistan", "Albania", "Algeria",
    "Andorra", "Angola", "Argentina", "Armenia", "Australia", "Austria", "Azerbaijan",
    "Bahamas", "Bahrain", "Bangladesh", "Barbados", "Belarus", "Belgium", "Belize", "Benin",
    "Bhutan", "Bolivia", "Bosnia and Herzegovina", "Botswana", "Brazil", "Brunei",
    "Bulgaria", "Burkina Faso", "Burundi", "Cambodia", "Cameroon", "Canada", "Cape Verde",
    "Central African Republic", "Chad", "Chile", "Colombia", "Comoros", "Congo",
    "Costa Rica", "Croatia", "Cuba", "Cyprus", "Czech Republic", "Denmark", "Djibouti",
    "Dominica", "Dominican Republic", "East Timor", "Ecuador", "Egypt", "El Salvador",
    "Equatorial Guinea", "Eritrea", "Estonia", "Eswatini", "Ethiopia", "Fiji", "Finland",
    "Gabon", "Gambia", "Georgia", "Ghana", "Greece", "Grenada", "Guatemala", "Guinea",
    "Guinea-Bissau", "Guyana", "Haiti", "Honduras", "Hungary", "Iceland", "India",
    "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Jamaica", "Japan", "Jordan",
    "Kazakhstan", "Kenya", "Kiribati", "Kosovo", "Kuwait", "Kyrgyzstan", "Laos", "Latvia",
    "Lebanon", "Lesotho", "Liberia", "Libya", "Liechtenstein", "Lithuania", "Luxembourg",
    "Madagascar", "Malawi", "Malaysia", "Maldives", "Mali", "Malta", "Marshall Islands",
    "Mauritania", "Mauritius", "Mexico", "Micronesia", "Moldova", "Monaco", "Mongolia",
    "Montenegro", "Morocco", "Mozambique", "Myanmar", "Namibia", "Nauru", "Nepal",
    "Netherlands", "New Zealand", "Nicaragua", "Niger", "Nigeria", "North Korea",
    "North Macedonia", "Norway", "Oman", "Pakistan", "Palau", "Palestine", "Panama",
    "Papua New Guinea", "Paraguay", "Peru", "Philippines", "Poland", "Portugal", "Qatar",
    "Romania", "Russia", "Rwanda", "Saint Kitts and Nevis", "Saint Lucia",
    "Saint Vincent and the Grenadines", "Samoa", "San Marino", "Sao Tome and Principe",
    "Saudi Arabia", "Senegal", "Serbia", "Seychelles", "Sierra Leone", "Singapore",
    "Slovakia", "Slovenia", "Solomon Islands", "Somalia", "South Africa", "South Korea",
    "South Sudan", "Spain", "Sri Lanka", "Sudan", "Suriname", "Sweden", "Switzerland",
    "Syria", "Taiwan", "Tajikistan", "Tanzania", "Thailand", "Togo", "Tonga",
    "Trinidad and Tobago", "Tunisia", "Turkey", "Turkmenistan", "Tuvalu", "Uganda",
    "Ukraine", "United Arab Emirates", "United Kingdom", "Uruguay", "Uzbekistan", "Vanuatu",
    "Vatican City", "Venezuela", "Vietnam", "Yemen", "Zambia", "Zimbabwe",
];

/// 原产国
///
/// 只能通过 `FromStr` 从 [`COUNTRIES`] 中取得，内部持有列表中的规范名称。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Country(&'static str);

impl Country {
    pub const CHINA: Country = Country("China");

    pub fn name(&self) -> &'static str {
        self.0
    }

    /// China 附加税只对原产国为 China 的明细生效
    pub fn is_china(&self) -> bool {
        *self == Country::CHINA
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Country {
    type Err = String;

    /// 名称精确匹配（忽略大小写与首尾空白）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        COUNTRIES
            .iter()
            .find(|name| name.eq_ignore_ascii_case(trimmed))
            .map(|name| Country(*name))
            .ok_or_else(|| trimmed.to_string())
    }
}

impl Serialize for Country {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for Country {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<Country>()
            .map_err(|name| serde::de::Error::custom(format!("未列出的原产国: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_parse_listed() {
        let country: Country = "china".parse().unwrap();
        assert_eq!(country, Country::CHINA);
        assert!(country.is_china());

        let usa: Country = " USA ".parse().unwrap();
        assert_eq!(usa.name(), "USA");
        assert!(!usa.is_china());
    }

    #[test]
    fn test_country_parse_unlisted() {
        assert_eq!("Atlantis".parse::<Country>(), Err("Atlantis".to_string()));
        assert!("".parse::<Country>().is_err());
    }

    #[test]
    fn test_country_list_has_no_duplicates() {
        let mut names: Vec<&str> = COUNTRIES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COUNTRIES.len());
    }

    #[test]
    fn test_country_serde_round_trip() {
        let json = serde_json::to_string(&Country::CHINA).unwrap();
        assert_eq!(json, "\"China\"");
        let back: Country = serde_json::from_str("\"Germany\"").unwrap();
        assert_eq!(back.name(), "Germany");
        assert!(serde_json::from_str::<Country>("\"Atlantis\"").is_err());
    }
}
