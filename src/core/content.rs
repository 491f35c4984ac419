//=========================================================================
// Content Provider
//=========================================================================
//
// Read-only section content shown along the interior path.
//
// Architecture:
//   ContentConfig (TOML / defaults) → ContentProvider
//   Section (tagged enum) → payload() → SectionPayload<'_>
//
// Loaded once at startup and never mutated by the scene controller.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

//=== Section =============================================================

/// Content section a waypoint points at.
///
/// Parsed from the waypoint's string tag. Experience sections carry the
/// key of their detail entry (`"experience-qube"` → `Experience("qube")`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Section {
    /// Welcome board at the start of the path.
    Start,

    /// Personal summary.
    About,

    /// Grouped technical skills.
    Skills,

    /// One work experience, keyed into the experience details.
    Experience(String),

    /// Education history.
    Education,

    /// Tag with no known layout. Kept on the path, renders nothing.
    Custom(String),
}

impl Section {
    /// Tag prefix for experience sections.
    pub const EXPERIENCE_PREFIX: &'static str = "experience-";

    /// Returns the experience key for experience sections.
    pub fn experience_key(&self) -> Option<&str> {
        match self {
            Self::Experience(key) => Some(key),
            _ => None,
        }
    }
}

impl FromStr for Section {
    type Err = std::convert::Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let section = match tag {
            "start" => Self::Start,
            "about" => Self::About,
            "skills" => Self::Skills,
            "education" => Self::Education,
            other => match other.strip_prefix(Self::EXPERIENCE_PREFIX) {
                Some(key) if !key.is_empty() => Self::Experience(key.to_string()),
                _ => Self::Custom(other.to_string()),
            },
        };
        Ok(section)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::About => f.write_str("about"),
            Self::Skills => f.write_str("skills"),
            Self::Education => f.write_str("education"),
            Self::Experience(key) => write!(f, "{}{}", Self::EXPERIENCE_PREFIX, key),
            Self::Custom(tag) => f.write_str(tag),
        }
    }
}

//=== Content Records =====================================================

/// Text on the welcome board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartContent {
    pub title: String,
    pub subtitle: String,
    pub body: String,
}

/// Personal summary shown in the about section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    pub summary: String,
    #[serde(default)]
    pub links: BTreeMap<String, String>,
}

/// A named group of skills (e.g. "Languages").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

/// Interpersonal skills and spoken languages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoftSkills {
    pub skills: Vec<String>,
    pub languages: Vec<String>,
}

/// Extended payload for one work experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceDetail {
    pub title: String,
    pub company: String,
    pub location: String,
    pub duration: String,
    pub details: Vec<String>,
}

/// One education entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub duration: String,
    /// Grade line as displayed ("CGPA: 8.6", "Score: 73%").
    pub grade: String,
}

/// Serialized content table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub start: StartContent,
    pub personal: PersonalInfo,
    pub skills: Vec<SkillGroup>,
    pub soft_skills: SoftSkills,
    pub experiences: BTreeMap<String, ExperienceDetail>,
    pub education: Vec<EducationEntry>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let mut experiences = BTreeMap::new();
        experiences.insert(
            "qube".to_string(),
            ExperienceDetail {
                title: "Junior Software Engineer".into(),
                company: "QUBE CINEMA TECHNOLOGIES".into(),
                location: "Chennai".into(),
                duration: "Feb 2023 - Present".into(),
                details: strings(&[
                    "Working on low-level applications and drivers using Rust, C/C++, and GStreamer",
                    "Implemented SNMP for playback servers with Prometheus and Grafana integration",
                    "Developed front-end components with React.js",
                    "Back-end development with GoLang for custom Linux-based playback servers using Yocto",
                    "Experience with DRM, HDMI, FPGA, JTAG, Vitis, and Vivado",
                    "Python back-end automation and UI automation using Puppeteer and Selenium",
                    "Dockerized independent services for development",
                ]),
            },
        );
        experiences.insert(
            "zoho".to_string(),
            ExperienceDetail {
                title: "Student Intern".into(),
                company: "ZOHO CORPORATION".into(),
                location: "Chennai".into(),
                duration: "Apr 2022 - May 2022".into(),
                details: strings(&[
                    "Developed a supermarket billing system with Java",
                    "Created survey forms and Cricket Web application",
                    "Utilized Java, Servlets, JSP, MySQL, and Tomcat Server",
                    "Worked under CRM core team supervision",
                    "Gained experience in full-stack development",
                ]),
            },
        );

        Self {
            start: StartContent {
                title: "ASJ THILAK".into(),
                subtitle: "Welcomes you to his Portfolio".into(),
                body: "Navigate through the journey using the arrows on the right bottom. \
                       Explore his experience, skills, and education in this interactive portfolio."
                    .into(),
            },
            personal: PersonalInfo {
                name: "JAGANATH THILAK A S".into(),
                location: "Chennai, India".into(),
                phone: "9176233658".into(),
                email: "asjthilak@gmail.com".into(),
                summary: "A software engineer skilled in programming with a strong foundation in \
                          math, logic, data structures, and algorithms. I am a quick learner who \
                          loves to understand and learn new applications & technologies every \
                          day. I am interested in developing and computing contemporary \
                          applications on my own for the betterment of society, which makes my \
                          profile interesting. I am currently looking for the role of a Rust \
                          developer to pursue my career and incorporate my skills effectively."
                    .into(),
                links: BTreeMap::from([
                    (
                        "linkedin".to_string(),
                        "https://www.linkedin.com/in/asj-thilak-t8055/".to_string(),
                    ),
                    ("github".to_string(), "https://github.com/ASJTHILAK".to_string()),
                ]),
            },
            skills: vec![
                SkillGroup {
                    category: "Languages".into(),
                    items: strings(&[
                        "Rust",
                        "C/C++",
                        "GoLang",
                        "Python",
                        "HTML/CSS",
                        "JavaScript",
                    ]),
                },
                SkillGroup {
                    category: "Technologies".into(),
                    items: strings(&["ReactJS", "MySQL", "SQLite", "GStreamer", "Yocto"]),
                },
                SkillGroup {
                    category: "Tools".into(),
                    items: strings(&["Git", "Docker", "Prometheus", "Grafana", "Vitis", "Vivado"]),
                },
            ],
            soft_skills: SoftSkills {
                skills: strings(&[
                    "Teamwork",
                    "Leadership",
                    "Problem Solving",
                    "Critical Thinking",
                    "Adaptability",
                    "Creativity",
                ]),
                languages: strings(&["English", "Tamil", "Hindi", "French"]),
            },
            experiences,
            education: vec![
                EducationEntry {
                    degree: "Bachelor of Engineering in Computer Science".into(),
                    institution: "St. Joseph's College of Engineering".into(),
                    duration: "Aug 2019 - May 2023".into(),
                    grade: "CGPA: 8.6".into(),
                },
                EducationEntry {
                    degree: "Higher Secondary in Computer Science with Mathematics".into(),
                    institution: "St. Bede's Anglo Indian Higher Secondary School".into(),
                    duration: "Jun 2018 - May 2019".into(),
                    grade: "Score: 73%".into(),
                },
            ],
        }
    }
}

//=== SectionPayload ======================================================

/// Display payload for one section, borrowed from the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionPayload<'a> {
    Start(&'a StartContent),
    About(&'a PersonalInfo),
    Skills {
        groups: &'a [SkillGroup],
        soft: &'a SoftSkills,
    },
    Experience(&'a ExperienceDetail),
    Education(&'a [EducationEntry]),
}

//=== ContentProvider =====================================================

/// Static mapping from [`Section`] to its display payload.
#[derive(Debug, Clone, Default)]
pub struct ContentProvider {
    content: ContentConfig,
}

impl ContentProvider {
    pub fn new(content: ContentConfig) -> Self {
        Self { content }
    }

    /// Returns the payload rendered for `section`.
    ///
    /// `None` for custom tags and for experience keys with no detail entry.
    pub fn payload(&self, section: &Section) -> Option<SectionPayload<'_>> {
        match section {
            Section::Start => Some(SectionPayload::Start(&self.content.start)),
            Section::About => Some(SectionPayload::About(&self.content.personal)),
            Section::Skills => Some(SectionPayload::Skills {
                groups: &self.content.skills,
                soft: &self.content.soft_skills,
            }),
            Section::Experience(key) => self.experience(key).map(SectionPayload::Experience),
            Section::Education => Some(SectionPayload::Education(&self.content.education)),
            Section::Custom(_) => None,
        }
    }

    /// Looks up an experience detail by key.
    ///
    /// Accepts either the bare key (`"qube"`) or the section tag
    /// (`"experience-qube"`).
    pub fn experience(&self, id: &str) -> Option<&ExperienceDetail> {
        let key = id.strip_prefix(Section::EXPERIENCE_PREFIX).unwrap_or(id);
        self.content.experiences.get(key)
    }

    /// Experience keys in key order.
    pub fn experience_keys(&self) -> impl Iterator<Item = &str> {
        self.content.experiences.keys().map(String::as_str)
    }

    /// Experience keys in the order `sections` visits them, followed by
    /// any entries the sections never reach.
    pub fn experience_order<'s>(
        &self,
        sections: impl IntoIterator<Item = &'s Section>,
    ) -> Vec<String> {
        let mut order: Vec<String> = Vec::new();
        for key in sections.into_iter().filter_map(Section::experience_key) {
            if self.content.experiences.contains_key(key) && !order.iter().any(|k| k == key) {
                order.push(key.to_string());
            }
        }
        for key in self.experience_keys() {
            if !order.iter().any(|k| k == key) {
                order.push(key.to_string());
            }
        }
        order
    }

    /// Canonical key for `id` if a detail entry exists.
    pub(crate) fn resolve_experience_key(&self, id: &str) -> Option<String> {
        let key = id.strip_prefix(Section::EXPERIENCE_PREFIX).unwrap_or(id);
        self.content
            .experiences
            .contains_key(key)
            .then(|| key.to_string())
    }
}

//=== Tests ===============================================================
