//! Keyword registries
//!
//! Ordered `(key, keywords)` tables. Order is significant: the first entry
//! with a hit wins for process steps and content types, and module codes are
//! reported in table order. Keywords are lower-case and matched as
//! substrings of the lower-cased text.

/// An ordered keyword table
pub type Registry = &'static [(&'static str, &'static [&'static str])];

/// Functional module codes
pub const MODULES: Registry = &[
    (
        "FI",
        &[
            "financial accounting",
            "contabilità generale",
            "general ledger",
            "contabilita generale",
            "accounts payable",
            "accounts receivable",
            "bilancio",
        ],
    ),
    (
        "CO",
        &[
            "controlling",
            "controllo di gestione",
            "cost center",
            "centro di costo",
            "centri di costo",
            "profit center",
        ],
    ),
    (
        "MM",
        &[
            "materials management",
            "gestione materiali",
            "purchase order",
            "ordine di acquisto",
            "ordini di acquisto",
            "procurement",
            "approvvigionamento",
        ],
    ),
    (
        "SD",
        &[
            "sales and distribution",
            "sales order",
            "ordine di vendita",
            "ordini di vendita",
            "fatturazione attiva",
            "billing document",
        ],
    ),
    (
        "PP",
        &[
            "production planning",
            "pianificazione della produzione",
            "bill of materials",
            "distinta base",
            "ordine di produzione",
            "production order",
            "mrp",
        ],
    ),
    (
        "QM",
        &[
            "quality management",
            "gestione qualità",
            "gestione qualita",
            "quality inspection",
            "controllo qualità",
            "controllo qualita",
        ],
    ),
    (
        "PM",
        &[
            "plant maintenance",
            "manutenzione impianti",
            "maintenance order",
            "ordine di manutenzione",
        ],
    ),
    (
        "HR",
        &[
            "human resources",
            "risorse umane",
            "payroll",
            "paghe",
            "personnel administration",
            "amministrazione del personale",
        ],
    ),
    (
        "WM",
        &[
            "warehouse management",
            "gestione magazzino",
            "storage bin",
            "ubicazione",
            "stock transfer",
        ],
    ),
    ("PS", &["project system", "wbs element", "elemento wbs", "network activity"]),
    ("BW", &["business warehouse", "datasource", "infocube", "data warehouse", "reporting bw"]),
    ("ABAP", &["abap", "function module", "modulo funzione", "badi", "user exit", "smartform"]),
];

/// Project process steps, earliest first
pub const PROCESS_STEPS: Registry = &[
    (
        "analysis",
        &[
            "analisi",
            "analysis",
            "requisiti",
            "requirements",
            "as-is",
            "as is",
            "gap analysis",
            "blueprint",
        ],
    ),
    (
        "design",
        &["design", "progettazione", "disegno", "architettura", "architecture", "to-be", "to be"],
    ),
    (
        "development",
        &[
            "sviluppo",
            "development",
            "implementazione",
            "implementation",
            "customizing",
            "realizzazione",
        ],
    ),
    (
        "testing",
        &["test", "collaudo", "uat", "verifica", "validation", "validazione", "quality assurance"],
    ),
    (
        "deployment",
        &[
            "go-live",
            "go live",
            "rilascio",
            "deploy",
            "cutover",
            "avviamento",
            "messa in produzione",
        ],
    ),
    ("training", &["formazione", "training", "addestramento", "workshop"]),
    (
        "support",
        &["supporto", "support", "assistenza", "manutenzione", "hypercare", "ticket", "incident"],
    ),
];

/// Document content types
pub const CONTENT_TYPES: Registry = &[
    (
        "functional_spec",
        &[
            "specifica funzionale",
            "analisi funzionale",
            "functional specification",
            "functional spec",
            "documento funzionale",
        ],
    ),
    (
        "technical_spec",
        &[
            "specifica tecnica",
            "analisi tecnica",
            "technical specification",
            "technical spec",
            "documento tecnico",
        ],
    ),
    (
        "test_plan",
        &[
            "piano di test",
            "test plan",
            "test case",
            "casi di test",
            "scenario di test",
            "test script",
        ],
    ),
    (
        "user_manual",
        &[
            "manuale utente",
            "user manual",
            "user guide",
            "guida utente",
            "istruzioni operative",
            "manuale operativo",
        ],
    ),
    (
        "meeting_minutes",
        &["verbale", "minutes", "meeting notes", "riunione", "ordine del giorno", "agenda"],
    ),
    (
        "offer",
        &["offerta", "proposta commerciale", "quotation", "preventivo", "commercial proposal"],
    ),
    ("contract", &["contratto", "contract", "accordo quadro", "agreement", "condizioni generali"]),
    ("presentation", &["presentazione", "presentation", "slide", "kick-off", "kickoff"]),
    ("report", &["report", "rapporto", "relazione", "stato avanzamento", "status report"]),
];

/// Keys of every entry with at least one keyword hit, in table order
pub fn all_matches(registry: Registry, lowered: &str) -> Vec<String> {
    registry
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(key, _)| key.to_string())
        .collect()
}

/// Key of the first entry with a keyword hit, or an empty string
pub fn first_match(registry: Registry, lowered: &str) -> String {
    registry
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(key, _)| key.to_string())
        .unwrap_or_default()
}
