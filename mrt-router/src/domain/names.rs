//! Station names in the four display languages.

use std::fmt;
use std::str::FromStr;

use super::line::{Line, Station};

/// Display language for station names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// Traditional Chinese.
    Zh,
    #[default]
    En,
    Ja,
    Ko,
}

/// Error returned for an unrecognised language tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language {0:?}: expected one of zh, en, ja, ko")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts ISO 639-1 tags, plus the `jp` and `kr` country-style tags
    /// that clients commonly send.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" | "zh-tw" => Ok(Language::Zh),
            "en" => Ok(Language::En),
            "ja" | "jp" => Ok(Language::Ja),
            "ko" | "kr" => Ok(Language::Ko),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Zh => "zh",
            Language::En => "en",
            Language::Ja => "ja",
            Language::Ko => "ko",
        })
    }
}

/// A station's name in every supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationName {
    zh: &'static str,
    en: &'static str,
    ja: &'static str,
    ko: &'static str,
}

impl StationName {
    const fn new(zh: &'static str, en: &'static str, ja: &'static str, ko: &'static str) -> Self {
        Self { zh, en, ja, ko }
    }

    /// The name in `lang`.
    pub fn get(&self, lang: Language) -> &'static str {
        match lang {
            Language::Zh => self.zh,
            Language::En => self.en,
            Language::Ja => self.ja,
            Language::Ko => self.ko,
        }
    }
}

impl Station {
    /// All names of this station.
    pub fn names(&self) -> &'static StationName {
        let (table, first) = match (self.line(), self.number()) {
            (Line::R, _) => (RED, 2),
            (Line::G, _) => (GREEN, 1),
            (Line::BL, _) => (BLUE, 1),
            (Line::BR, _) => (BROWN, 1),
            (Line::Y, _) => (YELLOW, 7),
            (Line::O, n) if n >= 50 => (ORANGE_LUZHOU, 50),
            (Line::O, _) => (ORANGE, 1),
        };
        // Every valid station has a row; see `every_station_has_a_name`.
        &table[usize::from(self.number() - first)]
    }

    /// The station's name in `lang`.
    pub fn name(&self, lang: Language) -> &'static str {
        self.names().get(lang)
    }
}

static RED: &[StationName] = &[
    StationName::new("象山", "Xiangshan", "象山", "샹산"),
    StationName::new("台北101/世貿", "Taipei 101/World Trade Center", "台北101/世界貿易センター", "타이베이101/세계무역센터"),
    StationName::new("信義安和", "Xinyi Anhe", "信義安和", "신이 안허"),
    StationName::new("大安", "Daan", "大安", "다안"),
    StationName::new("大安森林公園", "Daan Park", "大安森林公園", "다안 삼림 공원"),
    StationName::new("東門", "Dongmen", "東門", "둥먼"),
    StationName::new("中正紀念堂", "Chiang Kai-Shek Memorial Hall", "中正紀念堂", "중정 기념당"),
    StationName::new("台大醫院", "NTU Hospital", "台湾大学病院", "대만 대학 병원"),
    StationName::new("台北車站", "Taipei Main Station", "台北駅", "타이베이 역"),
    StationName::new("中山", "Zhongshan", "中山", "중산"),
    StationName::new("雙連", "Shuanglian", "双連", "솽롄"),
    StationName::new("民權西路", "Minquan W. Rd.", "民権西路", "민취안시루"),
    StationName::new("圓山", "Yuanshan", "圓山", "위안산"),
    StationName::new("劍潭", "Jiantan", "剣潭", "젠탄"),
    StationName::new("士林", "Shilin", "士林", "스린"),
    StationName::new("芝山", "Zhishan", "芝山", "즈산"),
    StationName::new("明德", "Mingde", "明徳", "밍더"),
    StationName::new("石牌", "Shipai", "石牌", "스파이"),
    StationName::new("唭哩岸", "Qilian", "唭哩岸", "치리안"),
    StationName::new("奇岩", "Qiyan", "奇岩", "치옌"),
    StationName::new("北投", "Beitou", "北投", "베이터우"),
    StationName::new("復興崗", "Fuxinggang", "復興崗", "푸싱강"),
    StationName::new("忠義", "Zhongyi", "忠義", "중이"),
    StationName::new("關渡", "Guandu", "関渡", "관두"),
    StationName::new("竹圍", "Zhuwei", "竹囲", "주웨이"),
    StationName::new("紅樹林", "Hongshulin", "紅樹林", "훙수린"),
    StationName::new("淡水", "Tamsui", "淡水", "단수이"),
];

static GREEN: &[StationName] = &[
    StationName::new("新店", "Xindian", "新店", "신뎬"),
    StationName::new("新店區公所", "Xindian District Office", "新店区役所", "신뎬 구청"),
    StationName::new("七張", "Qizhang", "七張", "치장"),
    StationName::new("大坪林", "Dapinglin", "大坪林", "다핑린"),
    StationName::new("景美", "Jingmei", "景美", "징메이"),
    StationName::new("萬隆", "Wanlong", "万隆", "완룽"),
    StationName::new("公館", "Gongguan", "公館", "궁관"),
    StationName::new("台電大樓", "Taipower Building", "台湾電力ビル", "대만 전력공사 빌딩"),
    StationName::new("古亭", "Guting", "古亭", "구팅"),
    StationName::new("中正紀念堂", "Chiang Kai-Shek Memorial Hall", "中正紀念堂", "중정 기념당"),
    StationName::new("小南門", "Xiaonanmen", "小南門", "샤오난먼"),
    StationName::new("西門", "Ximen", "西門", "시먼"),
    StationName::new("北門", "Beimen", "北門", "베이머"),
    StationName::new("中山", "Zhongshan", "中山", "중산"),
    StationName::new("松江南京", "Songjiang Nanjing", "松江南京", "송장 난징"),
    StationName::new("南京復興", "Nanjing Fuxing", "南京復興", "난징 푸싱"),
    StationName::new("台北小巨蛋", "Taipei Arena", "台北アリーナ", "타이베이 아레나"),
    StationName::new("南京三民", "Nanjing Sanmin", "南京三民", "난징 싼민"),
    StationName::new("松山", "Songshan", "松山", "송산"),
];

static BLUE: &[StationName] = &[
    StationName::new("頂埔", "Dingpu", "頂埔", "딩푸"),
    StationName::new("永寧", "Yongning", "永寧", "융닝"),
    StationName::new("土城", "Tucheng", "土城", "투청"),
    StationName::new("海山", "Haishan", "海山", "하이산"),
    StationName::new("亞東醫院", "Far Eastern Hospital", "亜東病院", "야둥 병원"),
    StationName::new("府中", "Fuzhong", "府中", "푸중"),
    StationName::new("板橋", "Banqiao", "板橋", "반차오"),
    StationName::new("新埔", "Xinpu", "新埔", "신푸"),
    StationName::new("江子翠", "Jiangzicui", "江子翠", "장쯔추이"),
    StationName::new("龍山寺", "Longshan Temple", "龍山寺", "용산사"),
    StationName::new("西門", "Ximen", "西門", "시먼"),
    StationName::new("台北車站", "Taipei Main Station", "台北駅", "타이베이 역"),
    StationName::new("善導寺", "Shandao Temple", "善導寺", "산다오사"),
    StationName::new("忠孝新生", "Zhongxiao Xinsheng", "忠孝新生", "중샤오 신성"),
    StationName::new("忠孝復興", "Zhongxiao Fuxing", "忠孝復興", "중샤오 푸싱"),
    StationName::new("忠孝敦化", "Zhongxiao Dunhua", "忠孝敦化", "중샤오 둔화"),
    StationName::new("國父紀念館", "Sun Yat-Sen Memorial Hall", "国父紀念館", "국부 기념관"),
    StationName::new("市政府", "Taipei City Hall", "台北市政府", "타이베이 시청"),
    StationName::new("永春", "Yongchun", "永春", "융춘"),
    StationName::new("後山埤", "Houshanpi", "後山埤", "허우산피"),
    StationName::new("昆陽", "Kunyang", "昆陽", "쿤양"),
    StationName::new("南港", "Nangang", "南港", "난강"),
    StationName::new("南港展覽館", "Taipei Nangang Exhibition Center", "南港展覧館", "난강 전람관"),
];

static BROWN: &[StationName] = &[
    StationName::new("動物園", "Taipei Zoo", "動物園", "동물원"),
    StationName::new("木柵", "Muzha", "木柵", "무자"),
    StationName::new("萬芳社區", "Wanfang Community", "万芳コミュニティ", "완팡 단지"),
    StationName::new("萬芳醫院", "Wanfang Hospital", "万芳病院", "완팡 병원"),
    StationName::new("辛亥", "Xinhai", "辛亥", "신하이"),
    StationName::new("麟光", "Linguang", "麟光", "린광"),
    StationName::new("六張犁", "Liuzhangli", "六張犁", "류장리"),
    StationName::new("科技大樓", "Technology Building", "テクノロジービル", "테크놀로지 빌딩"),
    StationName::new("大安", "Daan", "大安", "다안"),
    StationName::new("忠孝復興", "Zhongxiao Fuxing", "忠孝復興", "중샤오 푸싱"),
    StationName::new("南京復興", "Nanjing Fuxing", "南京復興", "난징 푸싱"),
    StationName::new("中山國中", "Zhongshan Junior High School", "中山中学校", "중산 중학교"),
    StationName::new("松山機場", "Songshan Airport", "松山空港", "송산 공항"),
    StationName::new("大直", "Dazhi", "大直", "다즈"),
    StationName::new("劍南路", "Jiannan Rd.", "剣南路", "젠난루"),
    StationName::new("西湖", "Xihu", "西湖", "시후"),
    StationName::new("港墘", "Gangqian", "港墘", "강첸"),
    StationName::new("文德", "Wende", "文徳", "원더"),
    StationName::new("內湖", "Neihu", "内湖", "네이후"),
    StationName::new("大湖公園", "Dahu Park", "大湖公園", "다후 공원"),
    StationName::new("葫州", "Huzhou", "葫洲", "후저우"),
    StationName::new("東湖", "Donghu", "東湖", "둥후"),
    StationName::new("南港軟體園區", "Nangang Software Park", "南港ソフトウェアパーク", "난강 소프트웨어 단지"),
    StationName::new("南港展覽館", "Taipei Nangang Exhibition Center", "南港展覧館", "난강 전람관"),
];

static YELLOW: &[StationName] = &[
    StationName::new("大坪林", "Dapinglin", "大坪林", "다핑린"),
    StationName::new("十四張", "Shisizhang", "十四張", "스쓰장"),
    StationName::new("秀朗橋", "Xiulang Bridge", "秀朗橋", "시우랑챠오"),
    StationName::new("景平", "Jingping", "景平", "징핑"),
    StationName::new("景安", "Jingan", "景安", "징안"),
    StationName::new("中和", "Zhonghe", "中和", "중허"),
    StationName::new("橋和", "Qiaohe", "橋和", "챠오허"),
    StationName::new("中原", "Zhongyuan", "中原", "중위엔"),
    StationName::new("板新", "Banxin", "板新", "반신"),
    StationName::new("板橋", "Banqiao", "板橋", "반차오"),
    StationName::new("新埔民生", "Xinpu Minsheng", "新埔民生", "신푸민셩"),
    StationName::new("頭前庄", "Touqianzhuang", "頭前庄", "터우첸좡"),
    StationName::new("幸福", "Xingfu", "幸福", "씽푸"),
    StationName::new("新北產業園區", "New Taipei Industrial Park", "新北産業園区", "신베이 산업원 단지"),
];

static ORANGE: &[StationName] = &[
    StationName::new("南勢角", "Nanshijiao", "南勢角", "난스자오"),
    StationName::new("景安", "Jingan", "景安", "징안"),
    StationName::new("永安市場", "Yongan Market", "永安市場", "융안 시장"),
    StationName::new("頂溪", "Dingxi", "頂渓", "딩시"),
    StationName::new("古亭", "Guting", "古亭", "구팅"),
    StationName::new("東門", "Dongmen", "東門", "둥먼"),
    StationName::new("忠孝新生", "Zhongxiao Xinsheng", "忠孝新生", "중샤오 신성"),
    StationName::new("松江南京", "Songjiang Nanjing", "松江南京", "송장 난징"),
    StationName::new("行天宮", "Xingtian Temple", "行天宮", "싱톈궁"),
    StationName::new("中山國小", "Zhongshan Elementary School", "中山小学校", "중산 초등학교"),
    StationName::new("民權西路", "Minquan W. Rd.", "民権西路", "민취안시루"),
    StationName::new("大橋頭", "Daqiaotou", "大橋頭", "다차오터우"),
    StationName::new("台北橋", "Taipei Bridge", "台北橋", "타이베이 대교"),
    StationName::new("菜寮", "Cailiao", "菜寮", "차이랴오"),
    StationName::new("三重", "Sanchong", "三重", "싼충"),
    StationName::new("先嗇宮", "Xianse Temple", "先嗇宮", "셴써궁"),
    StationName::new("頭前庄", "Touqianzhuang", "頭前庄", "터우첸좡"),
    StationName::new("新莊", "Xinzhuang", "新荘", "신좡"),
    StationName::new("輔大", "Fu Jen University", "輔仁大学", "푸런 대학교"),
    StationName::new("丹鳳", "Danfeng", "丹鳳", "단펑"),
    StationName::new("迴龍", "Huilong", "迴龍", "후이룽"),
];

static ORANGE_LUZHOU: &[StationName] = &[
    StationName::new("三重國小", "Sanchong Elementary School", "三重小学校", "싼충 초등학교"),
    StationName::new("三和國中", "Sanhe Junior High School", "三和中学校", "싼허 중학교"),
    StationName::new("徐匯中學", "St. Ignatius High School", "徐匯高校", "쉬후이 고등학교"),
    StationName::new("三民高中", "Sanmin Senior High School", "三民高校", "싼민 고등학교"),
    StationName::new("蘆洲", "Luzhou", "蘆洲", "루저우"),
];
#[cfg(test)]
mod tests {
    use super::*;

    fn st(code: &str) -> Station {
        Station::parse(code).unwrap()
    }

    #[test]
    fn every_station_has_a_name() {
        for line in Line::ALL {
            for station in line.stations() {
                for lang in [Language::Zh, Language::En, Language::Ja, Language::Ko] {
                    assert!(!station.name(lang).is_empty(), "{station} has no {lang} name");
                }
            }
        }
    }

    #[test]
    fn names_follow_numbering_offsets() {
        assert_eq!(st("R02").name(Language::En), "Xiangshan");
        assert_eq!(st("R28").name(Language::En), "Tamsui");
        assert_eq!(st("Y07").name(Language::En), "Dapinglin");
        assert_eq!(st("O12").name(Language::En), "Daqiaotou");
        assert_eq!(st("O21").name(Language::En), "Huilong");
        assert_eq!(st("O50").name(Language::En), "Sanchong Elementary School");
        assert_eq!(st("O54").name(Language::Zh), "蘆洲");
    }

    #[test]
    fn interchange_stations_share_names() {
        assert_eq!(st("R10").name(Language::Zh), st("BL12").name(Language::Zh));
        assert_eq!(st("G12").name(Language::Ja), st("BL11").name(Language::Ja));
    }

    #[test]
    fn parse_language_tags() {
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert_eq!("JP".parse::<Language>(), Ok(Language::Ja));
        assert_eq!("kr".parse::<Language>(), Ok(Language::Ko));
        assert_eq!("zh-TW".parse::<Language>(), Ok(Language::Zh));
        assert!("fr".parse::<Language>().is_err());
    }
}
