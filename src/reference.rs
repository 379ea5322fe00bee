use serde::Serialize;

/// Genome builds with a known organism. New builds only need a row here.
const ORGANISMS: &[(&str, &str)] = &[
    ("hg18", "Human"),
    ("hg19", "Human"),
    ("hg38", "Human"),
    ("GRCh37", "Human"),
    ("GRCh38", "Human"),
    ("mm9", "Mouse"),
    ("mm10", "Mouse"),
    ("GRCm38", "Mouse"),
    ("GRCm39", "Mouse"),
];

/// Placeholder the LIMS stores when no specific genome was selected.
const NO_GENOME: &str = "other";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub genome: Option<String>,
    pub organism: Option<String>,
}

impl Reference {
    pub fn resolve(raw_genome: Option<&str>) -> Self {
        let genome = raw_genome.filter(|genome| *genome != NO_GENOME);
        Self {
            genome: genome.map(str::to_string),
            organism: genome.and_then(organism_for).map(str::to_string),
        }
    }
}

pub fn organism_for(genome: &str) -> Option<&'static str> {
    ORGANISMS
        .iter()
        .find(|(build, _)| *build == genome)
        .map(|(_, organism)| *organism)
}
