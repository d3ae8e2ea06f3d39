use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 지원하는 GPU 칩 종류. 설정의 칩별 프로필 키로 그대로 쓰인다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChipType {
    B200,
    B300,
    GB300,
    #[serde(rename = "GB200 NVL72")]
    Gb200Nvl72,
    #[serde(rename = "GB300 NVL72")]
    Gb300Nvl72,
    H100,
    H200,
    MI350X,
}

impl ChipType {
    pub const ALL: [ChipType; 8] = [
        ChipType::B200,
        ChipType::B300,
        ChipType::GB300,
        ChipType::Gb200Nvl72,
        ChipType::Gb300Nvl72,
        ChipType::H100,
        ChipType::H200,
        ChipType::MI350X,
    ];

    /// 화면/로그 표기용 이름.
    pub fn label(&self) -> &'static str {
        match self {
            ChipType::B200 => "B200",
            ChipType::B300 => "B300",
            ChipType::GB300 => "GB300",
            ChipType::Gb200Nvl72 => "GB200 NVL72",
            ChipType::Gb300Nvl72 => "GB300 NVL72",
            ChipType::H100 => "H100",
            ChipType::H200 => "H200",
            ChipType::MI350X => "MI350X",
        }
    }
}

impl std::fmt::Display for ChipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChipType {
    type Err = String;

    /// 대소문자, 공백, `-`, `_`를 무시하고 표기 이름과 맞춘다. (`gb300-nvl72` == `GB300 NVL72`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squash = |text: &str| -> String {
            text.chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_'))
                .flat_map(char::to_lowercase)
                .collect()
        };
        let wanted = squash(s);
        ChipType::ALL
            .iter()
            .copied()
            .find(|chip| squash(chip.label()) == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = ChipType::ALL.iter().map(|c| c.label()).collect();
                format!("Invalid chip '{s}'. Valid options: {}", valid.join(", "))
            })
    }
}
