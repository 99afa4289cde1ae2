use std::collections::HashMap;

use lazy_static::lazy_static;

pub const SARGA: &str = "सर्ग";
pub const SHLOKA: &str = "श्लोक";
pub const MANDALA: &str = "मण्डल";
pub const SUKTA: &str = "सूक्त";
pub const ADHYAYA: &str = "अध्याय";
pub const KAANDA: &str = "काण्ड";

/// Separator between the parts of a compound label, e.g. शौनक • काण्ड 1
pub const LABEL_SEPARATOR: &str = " • ";

pub const UNKNOWN_PARVA: &str = "अज्ञात पर्व";

lazy_static! {
    // Valmiki Ramayana kaanda keys
    static ref KAANDA_LABELS: HashMap<&'static str, &'static str> = HashMap::from([
        ("balakanda", "बालकाण्ड"),
        ("ayodhyakanda", "अयोध्याकाण्ड"),
        ("aranyakanda", "अरण्यकाण्ड"),
        ("kishkindhakanda", "किष्किन्धाकाण्ड"),
        ("sundarakanda", "सुन्दरकाण्ड"),
        ("yudhhakanda", "युद्धकाण्ड"),
        ("uttarakanda", "उत्तरकाण्ड"),
    ]);

    // Mahabharata book numbers, 01 to 18 in the critical edition keys
    static ref PARVA_LABELS: HashMap<u32, &'static str> = HashMap::from([
        (1, "आदी पर्व"),
        (2, "सभापर्व"),
        (3, "वनपर्व"),
        (4, "विराटपर्व"),
        (5, "उद्योगपर्व"),
        (6, "भीष्मपर्व"),
        (7, "द्रोणपर्व"),
        (8, "कर्णपर्व"),
        (9, "शल्यपर्व"),
        (10, "सौप्तिकपर्व"),
        (11, "स्त्रीपर्व"),
        (12, "शान्तिपर्व"),
        (13, "अनुशासनपर्व"),
        (14, "अपरोक्षविजयपर्व"),
        (15, "अश्वमेधपर्व"),
        (16, "मुक्तिपर्व"),
        (17, "स्वर्गारोहणिका पर्व"),
        (18, "उपसंहार / अंतिम पर्व"),
    ]);

    static ref ATHARVA_SAMHITA_LABELS: HashMap<&'static str, &'static str> = HashMap::from([
        ("shaunak", "शौनक"),
        ("paippalada", "पैप्पलाद"),
    ]);

    static ref YAJUR_SAMHITA_LABELS: HashMap<&'static str, &'static str> = HashMap::from([
        ("vajasneyi-kanva-samhita", "वाजसनेयी काण्व"),
        ("vajasneyi-madhyandina-samhita", "वाजसनेयी मध्यदीन"),
    ]);
}

fn label_or_key(table: &HashMap<&'static str, &'static str>, key: &str) -> String {
    table.get(key).map(|s| s.to_string()).unwrap_or_else(|| key.to_string())
}

/// balakanda to बालकाण्ड, unknown keys are kept as they are
pub fn kaanda_label(key: &str) -> String {
    label_or_key(&KAANDA_LABELS, key)
}

/// 18 to उपसंहार / अंतिम पर्व
pub fn parva_label(book: u32) -> &'static str {
    PARVA_LABELS.get(&book).copied().unwrap_or(UNKNOWN_PARVA)
}

/// shaunak to शौनक, unknown keys are kept as they are
pub fn atharva_samhita_label(key: &str) -> String {
    label_or_key(&ATHARVA_SAMHITA_LABELS, key)
}

/// vajasneyi-kanva-samhita to वाजसनेयी काण्व, unknown keys are kept as they are
pub fn yajur_samhita_label(key: &str) -> String {
    label_or_key(&YAJUR_SAMHITA_LABELS, key)
}

/// ("सर्ग", 12) to सर्ग 12
pub fn numbered_label(unit: &str, n: u32) -> String {
    format!("{} {}", unit, n)
}
