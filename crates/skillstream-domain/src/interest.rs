//! The closed set of learning interests a user can pick during onboarding.

use serde::{Deserialize, Serialize};

/// A learning interest category.
///
/// Wire format: the SCREAMING_SNAKE_CASE name (e.g. `"DATA_SCIENCE"`).
/// Content rows carry the same name in their `category` column, so interest
/// selection and content recommendation share one vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Interest {
    PythonProgramming,
    DataScience,
    UiUxDesign,
    DigitalMarketing,
    CloudComputing,
    Cybersecurity,
    ReactFramework,
    PersonalFinance,
}

impl Interest {
    /// Every interest, in presentation order.
    pub const ALL: [Interest; 8] = [
        Interest::PythonProgramming,
        Interest::DataScience,
        Interest::UiUxDesign,
        Interest::DigitalMarketing,
        Interest::CloudComputing,
        Interest::Cybersecurity,
        Interest::ReactFramework,
        Interest::PersonalFinance,
    ];

    /// Stable wire name, also used as the `category` value on content rows.
    pub fn name(self) -> &'static str {
        match self {
            Interest::PythonProgramming => "PYTHON_PROGRAMMING",
            Interest::DataScience => "DATA_SCIENCE",
            Interest::UiUxDesign => "UI_UX_DESIGN",
            Interest::DigitalMarketing => "DIGITAL_MARKETING",
            Interest::CloudComputing => "CLOUD_COMPUTING",
            Interest::Cybersecurity => "CYBERSECURITY",
            Interest::ReactFramework => "REACT_FRAMEWORK",
            Interest::PersonalFinance => "PERSONAL_FINANCE",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Interest::PythonProgramming => "Python Programming",
            Interest::DataScience => "Data Science",
            Interest::UiUxDesign => "UI/UX Design",
            Interest::DigitalMarketing => "Digital Marketing",
            Interest::CloudComputing => "Cloud Computing",
            Interest::Cybersecurity => "Cybersecurity",
            Interest::ReactFramework => "React Framework",
            Interest::PersonalFinance => "Personal Finance",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Interest::PythonProgramming => {
                "Learn Python programming fundamentals and advanced concepts"
            }
            Interest::DataScience => "Master data analysis, visualization, and machine learning",
            Interest::UiUxDesign => "Create beautiful and user-friendly interfaces",
            Interest::DigitalMarketing => "Learn digital marketing strategies and analytics",
            Interest::CloudComputing => "Explore cloud platforms and distributed systems",
            Interest::Cybersecurity => "Understand security principles and best practices",
            Interest::ReactFramework => "Build modern web applications with React",
            Interest::PersonalFinance => "Manage your finances and investments effectively",
        }
    }

    /// Icon identifier used by the frontend.
    pub fn icon_name(self) -> &'static str {
        match self {
            Interest::PythonProgramming => "puzzle",
            Interest::DataScience => "chart",
            Interest::UiUxDesign => "palette",
            Interest::DigitalMarketing => "megaphone",
            Interest::CloudComputing => "server",
            Interest::Cybersecurity => "shield",
            Interest::ReactFramework => "atom",
            Interest::PersonalFinance => "dollar",
        }
    }

    /// Total parse from the wire name. Returns `None` for anything outside
    /// the closed set.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.name() == name)
    }
}
