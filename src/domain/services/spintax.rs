use rand::Rng;

/// Expands spintax brackets (`{A|B|C}` picks one alternative) in a
/// template string. Nested groups are resolved innermost-first, so
/// `{a|{b|c}}` yields one of `a`, `b`, `c`.
pub fn expand(template: &str) -> String {
    expand_with(template, &mut rand::thread_rng())
}

pub fn expand_with<R: Rng>(template: &str, rng: &mut R) -> String {
    let mut current = template.to_string();

    // Each pass replaces one innermost group; a bounded loop guards
    // against pathological inputs with unbalanced braces.
    for _ in 0..128 {
        let Some((start, end)) = find_innermost_group(&current) else {
            break;
        };

        let inner = &current[start + 1..end];
        let options: Vec<&str> = inner.split('|').collect();
        let pick = options[rng.gen_range(0..options.len())];

        let mut next = String::with_capacity(current.len());
        next.push_str(&current[..start]);
        next.push_str(pick);
        next.push_str(&current[end + 1..]);
        current = next;
    }

    current
}

/// Byte offsets of the first `{ ... }` group containing no nested `{`.
fn find_innermost_group(s: &str) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    let mut open: Option<usize> = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'{' => open = Some(i),
            b'}' => {
                if let Some(start) = open {
                    return Some((start, i));
                }
            }
            _ => {}
        }
    }

    None
}

/// All full expansions of a template, used to assert that a picked
/// variant is legitimate without fixing the RNG.
pub fn all_variants(template: &str) -> Vec<String> {
    let Some((start, end)) = find_innermost_group(template) else {
        return vec![template.to_string()];
    };

    let inner = &template[start + 1..end];
    let mut results = Vec::new();
    for option in inner.split('|') {
        let mut candidate = String::with_capacity(template.len());
        candidate.push_str(&template[..start]);
        candidate.push_str(option);
        candidate.push_str(&template[end + 1..]);
        results.extend(all_variants(&candidate));
    }
    results
}
