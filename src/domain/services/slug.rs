/// ASCII slugifier used for vehicle detail URLs: lowercases, folds the
/// accented characters common in pt-BR inventory data, and collapses
/// everything else to single hyphens.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_hyphen = true;

    for ch in input.chars() {
        let folded: &str = match ch {
            'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => "a",
            'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => "e",
            'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => "i",
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => "o",
            'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => "u",
            'ç' | 'Ç' => "c",
            'ñ' | 'Ñ' => "n",
            _ => {
                if ch.is_ascii_alphanumeric() {
                    out.extend(ch.to_lowercase());
                    last_hyphen = false;
                    continue;
                }
                if !last_hyphen {
                    out.push('-');
                    last_hyphen = true;
                }
                continue;
            }
        };
        out.push_str(folded);
        last_hyphen = false;
    }

    out.trim_matches('-').to_string()
}

/// Detail slug for a vehicle without a persisted url: brand, model,
/// version, fuel, year and id, slugified and hyphen-joined. Empty
/// segments are dropped.
pub fn vehicle_slug(
    brand: &str,
    model: &str,
    version: Option<&str>,
    fuel: Option<&str>,
    year: Option<i32>,
    id: i64,
) -> String {
    let year_str = year.map(|y| y.to_string());
    let id_str = id.to_string();

    let segments = [
        Some(brand),
        Some(model),
        version,
        fuel,
        year_str.as_deref(),
        Some(id_str.as_str()),
    ];

    segments
        .into_iter()
        .flatten()
        .map(slugify)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
