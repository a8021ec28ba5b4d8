// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static page copy: hero counters, metric cards, causes, impacts and takeaways.

use crate::counter::AnimatedCounter;

/// Who published a figure, which decides the badge and trust score on a metric card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// UN agencies and other international bodies.
    Un,
    /// The World Bank.
    WorldBank,
    /// Peer-reviewed research; the fallback for unlisted sources.
    #[default]
    Academic,
    /// National governments.
    Government,
    /// NGOs and local organisations.
    Ngo,
}

impl SourceKind {
    /// Classifies a citation string. Unknown sources are treated as academic.
    pub fn classify(source: &str) -> Self {
        match source {
            "FAO 2024" | "Global Forest Watch" | "IUCN Red List 2023" | "UNEP 2024"
            | "UNEP PROSCAL 2024" => Self::Un,
            "World Bank 2023" => Self::WorldBank,
            _ => Self::default(),
        }
    }

    /// Badge label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Un => "UN/International",
            Self::WorldBank => "World Bank",
            Self::Academic => "Academic",
            Self::Government => "Government",
            Self::Ngo => "NGO/Local",
        }
    }

    /// Trust score in percent.
    pub fn trust(self) -> u8 {
        match self {
            Self::Un => 95,
            Self::WorldBank => 90,
            Self::Academic => 85,
            Self::Government => 75,
            Self::Ngo => 70,
        }
    }
}

/// One of the hero statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroStat {
    /// Animated figure.
    pub counter: AnimatedCounter,
    /// Caption under the figure.
    pub caption: &'static str,
}

/// The headline counter.
pub const HERO_HEADLINE: HeroStat = HeroStat {
    counter: AnimatedCounter::new(1.03).with_suffix("%"),
    caption: "Annual deforestation rate in Somalia",
};

/// The three counters under the headline.
pub const HERO_STATS: [HeroStat; 3] = [
    HeroStat {
        counter: AnimatedCounter::new(686.0).with_suffix("K"),
        caption: "Hectares lost since 2000",
    },
    HeroStat {
        counter: AnimatedCounter::new(218.0),
        caption: "Species threatened (IUCN)",
    },
    HeroStat {
        counter: AnimatedCounter::new(47.0).with_prefix("$").with_suffix("M"),
        caption: "Annual charcoal exports",
    },
];

/// Hero paragraph.
pub const HERO_DESCRIPTION: &str = "Somalia faces one of the world's highest deforestation rates, \
driven by charcoal production, drought, and weak environmental governance. Explore the data, \
understand the impact, and discover solutions.";

/// A cited key-metric card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricCard {
    /// Card title.
    pub title: &'static str,
    /// Headline value, already formatted.
    pub value: &'static str,
    /// One-sentence explanation.
    pub description: &'static str,
    /// Citation.
    pub source: &'static str,
}

impl MetricCard {
    /// Classification of [`MetricCard::source`].
    pub fn source_kind(&self) -> SourceKind {
        SourceKind::classify(self.source)
    }
}

/// "The Scale of the Crisis" cards.
pub const KEY_METRICS: &[MetricCard] = &[
    MetricCard {
        title: "Annual Deforestation Rate",
        value: "1.03%",
        description: "Somalia loses over 1% of its forest cover every year, one of the highest rates globally.",
        source: "FAO 2024",
    },
    MetricCard {
        title: "Forest Cover Lost",
        value: "686,000 ha",
        description: "Total hectares of forest lost since 2000, equivalent to an area larger than Delaware.",
        source: "Global Forest Watch",
    },
    MetricCard {
        title: "Charcoal Export Value",
        value: "$38-56M",
        description: "Annual revenue from charcoal exports, the primary driver of deforestation.",
        source: "World Bank 2023",
    },
    MetricCard {
        title: "Threatened Species",
        value: "218",
        description: "Number of species on the IUCN Red List threatened by habitat loss.",
        source: "IUCN Red List 2023",
    },
    MetricCard {
        title: "Economic Impact",
        value: "$216M",
        description: "Estimated annual economic cost of environmental degradation.",
        source: "UNEP 2024",
    },
    MetricCard {
        title: "Reforestation Progress",
        value: "12,500 ha",
        description: "Area successfully reforested through international initiatives like PROSCAL.",
        source: "UNEP PROSCAL 2024",
    },
];

/// A driver of deforestation and its share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cause {
    /// Emoji.
    pub icon: &'static str,
    /// Card title.
    pub title: &'static str,
    /// Explanation.
    pub description: &'static str,
    /// Direct effect on the forest.
    pub impact: &'static str,
    /// Share of deforestation, in percent.
    pub percentage: f64,
    /// Accent colour (`0xRRGGBB`).
    pub color: u32,
}

/// "Understanding the Drivers" cards. Shares sum to 100.
pub const CAUSES: &[Cause] = &[
    Cause {
        icon: "🔥",
        title: "Charcoal Production",
        description: "Illegal charcoal trade drives 65% of deforestation. Despite export bans, charcoal remains a primary income source, generating $38-56M annually.",
        impact: "Direct tree cutting for fuel production",
        percentage: 65.0,
        color: 0xDC2626,
    },
    Cause {
        icon: "🌵",
        title: "Drought & Climate Change",
        description: "Recurring droughts stress forests and force communities to exploit remaining trees for survival. Climate change intensifies dry conditions.",
        impact: "Forest stress and degradation",
        percentage: 20.0,
        color: 0xEA580C,
    },
    Cause {
        icon: "🏘️",
        title: "Agricultural Expansion",
        description: "Growing population and food insecurity drive clearing of forests for farmland and grazing. Limited arable land increases pressure.",
        impact: "Land conversion for food production",
        percentage: 10.0,
        color: 0xD97706,
    },
    Cause {
        icon: "⚖️",
        title: "Weak Governance",
        description: "Limited government control, inadequate enforcement of environmental laws, and corruption enable illegal logging and trade.",
        impact: "Lack of forest protection enforcement",
        percentage: 5.0,
        color: 0x6B7280,
    },
];

/// A labelled figure inside an impact card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactStat {
    /// Label.
    pub label: &'static str,
    /// Formatted value.
    pub value: &'static str,
}

/// A category of harm caused by forest loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactCard {
    /// Emoji.
    pub icon: &'static str,
    /// Card title.
    pub title: &'static str,
    /// Explanation.
    pub description: &'static str,
    /// Supporting figures.
    pub stats: [ImpactStat; 3],
}

const fn stat(label: &'static str, value: &'static str) -> ImpactStat {
    ImpactStat { label, value }
}

/// "The Ripple Effects" cards.
pub const IMPACTS: &[ImpactCard] = &[
    ImpactCard {
        icon: "🦋",
        title: "Biodiversity Loss",
        description: "Forest destruction eliminates habitats and threatens endemic species",
        stats: [
            stat("Species threatened", "218"),
            stat("Critically endangered", "18"),
            stat("Habitat loss rate", "1.03%/yr"),
        ],
    },
    ImpactCard {
        icon: "🌡️",
        title: "Climate Change",
        description: "Deforestation accelerates warming and reduces carbon sequestration",
        stats: [
            stat("CO₂ emissions", "9.2M tons"),
            stat("Temperature rise", "+2.1°C"),
            stat("Carbon storage lost", "15M tons"),
        ],
    },
    ImpactCard {
        icon: "💧",
        title: "Water Security",
        description: "Forest loss disrupts watersheds and reduces water availability",
        stats: [
            stat("Rainfall decline", "48%"),
            stat("Groundwater depletion", "2.3m/yr"),
            stat("Wells dried up", "1,847"),
        ],
    },
    ImpactCard {
        icon: "👥",
        title: "Human Impact",
        description: "Communities face displacement, food insecurity, and health issues",
        stats: [
            stat("People affected", "2.1M"),
            stat("Food insecure", "6.4M"),
            stat("Respiratory illness", "+67%"),
        ],
    },
];

/// A row of the economic consequences table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EconomicImpact {
    /// Cost category.
    pub category: &'static str,
    /// Formatted amount.
    pub value: &'static str,
    /// Explanation.
    pub description: &'static str,
    /// Direction of travel.
    pub trend: &'static str,
}

/// Headline of the economic table.
pub const ECONOMIC_TOTAL: &str = "$216M";

/// Economic consequences of degradation.
pub const ECONOMIC_IMPACTS: &[EconomicImpact] = &[
    EconomicImpact {
        category: "Direct Economic Losses",
        value: "$216M",
        description: "Annual cost of environmental degradation",
        trend: "+15% annually",
    },
    EconomicImpact {
        category: "Agricultural Productivity",
        value: "35%",
        description: "Decline in crop yields due to soil degradation",
        trend: "Worsening",
    },
    EconomicImpact {
        category: "Water Scarcity Costs",
        value: "$89M",
        description: "Additional costs for water access and treatment",
        trend: "+12% annually",
    },
    EconomicImpact {
        category: "Health Care Costs",
        value: "$45M",
        description: "Respiratory and malnutrition-related expenses",
        trend: "Rising",
    },
];

/// A figure in the key takeaways strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Takeaway {
    /// Formatted value.
    pub value: &'static str,
    /// Label.
    pub label: &'static str,
    /// Small print.
    pub note: &'static str,
}

/// Key takeaways closing the causes section.
pub const TAKEAWAYS: &[Takeaway] = &[
    Takeaway {
        value: "65%",
        label: "Charcoal Production",
        note: "Primary driver of deforestation",
    },
    Takeaway {
        value: "1.03%",
        label: "Annual Loss Rate",
        note: "Highest in East Africa",
    },
    Takeaway {
        value: "686K",
        label: "Hectares Lost",
        note: "Since 2000",
    },
];

/// A page section heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading {
    /// Anchor id.
    pub id: &'static str,
    /// Title.
    pub title: &'static str,
    /// Lead paragraph.
    pub subtitle: &'static str,
}

/// Key metrics section.
pub const KEY_METRICS_HEADING: Heading = Heading {
    id: "key-metrics",
    title: "The Scale of the Crisis",
    subtitle: "Somalia's forests are disappearing at an alarming rate. Here are the key numbers \
that tell the story of environmental degradation and its far-reaching consequences.",
};

/// Causes section.
pub const CAUSES_HEADING: Heading = Heading {
    id: "causes",
    title: "Understanding the Drivers",
    subtitle: "Multiple interconnected factors contribute to Somalia's rapid forest loss. Explore \
the data to understand how economic pressures, climate change, and governance challenges combine \
to threaten the nation's forests.",
};

/// Timeline block inside the causes section.
pub const TIMELINE_HEADING: Heading = Heading {
    id: "timeline",
    title: "Historical Timeline: 25 Years of Forest Loss",
    subtitle: "Track how key events and policy changes have impacted Somalia's forests from 2000 \
to 2025. Click on any year or use the play button to see the progression.",
};

/// Regional block inside the causes section.
pub const REGIONAL_HEADING: Heading = Heading {
    id: "regional",
    title: "Regional Context: East Africa Comparison",
    subtitle: "See how Somalia's deforestation compares to neighboring countries. Switch between \
different metrics to understand regional patterns and correlations.",
};

/// Impacts section.
pub const IMPACTS_HEADING: Heading = Heading {
    id: "impacts",
    title: "The Ripple Effects",
    subtitle: "Deforestation creates a cascade of environmental, social, and economic impacts \
that extend far beyond the loss of trees. Explore how forest destruction affects biodiversity, \
climate, communities, and Somalia's future.",
};

/// Biodiversity block inside the impacts section.
pub const BIODIVERSITY_HEADING: Heading = Heading {
    id: "biodiversity",
    title: "Biodiversity Under Threat",
    subtitle: "Forest habitat loss threatens species across multiple categories. Hover over each \
section to explore the impact on different animal and plant groups.",
};

/// Climate block inside the impacts section.
pub const CLIMATE_HEADING: Heading = Heading {
    id: "climate",
    title: "Climate & Environmental Indicators",
    subtitle: "Track how deforestation drives climate change and environmental degradation. \
Switch between different indicators to see 24 years of worsening conditions.",
};

/// Economic block inside the impacts section.
pub const ECONOMIC_HEADING: Heading = Heading {
    id: "economic",
    title: "Economic Consequences",
    subtitle: "Environmental degradation creates massive economic costs that burden Somalia's \
development and threaten long-term prosperity.",
};

/// Closing call to action.
pub const CALL_TO_ACTION: Heading = Heading {
    id: "action",
    title: "The Time for Action is Now",
    subtitle: "Somalia's forests and the communities that depend on them face an unprecedented \
crisis. But with coordinated action, sustainable solutions, and international support, we can \
reverse this trend and build a more resilient future.",
};

/// Footer line.
pub const FOOTER: &str = "© 2024 Kaymo. All rights reserved.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sources_are_classified() {
        assert_eq!(SourceKind::classify("FAO 2024"), SourceKind::Un);
        assert_eq!(SourceKind::classify("World Bank 2023"), SourceKind::WorldBank);
        assert_eq!(SourceKind::Un.trust(), 95);
        assert_eq!(SourceKind::WorldBank.label(), "World Bank");
    }

    #[test]
    fn unknown_sources_fall_back_to_academic() {
        let kind = SourceKind::classify("Somali Forestry Journal");
        assert_eq!(kind, SourceKind::Academic);
        assert_eq!(kind.trust(), 85);
    }

    #[test]
    fn every_metric_card_has_a_listed_source() {
        for card in KEY_METRICS {
            assert_ne!(card.source_kind(), SourceKind::Academic, "{}", card.source);
        }
    }

    #[test]
    fn cause_shares_cover_everything() {
        let total: f64 = CAUSES.iter().map(|c| c.percentage).sum();
        assert_eq!(total, 100.0);
    }
}
