use serde_json::{json, Value};

/// Static spintax template catalog served by the templates endpoint.
/// These are configuration data, not computed content.
pub fn template_catalog(content_type: &str) -> Option<Value> {
    match content_type {
        "vehicle_detail" => Some(json!({
            "type": "vehicle_detail",
            "titles": [
                "{Compre|Adquira|Garanta} {brand} {model} {year} {em oferta|com preço especial}",
                "{brand} {model} {year} {seminovo|usado} - {parcelas que cabem no bolso|financiamento facilitado}",
            ],
            "descriptions": [
                "{Confira|Veja} este {brand} {model} {version} {year} com {mileage} km. {Entre em contato|Fale conosco} e {agende um test drive|faça sua proposta}.",
                "{brand} {model} {year} revisado e com procedência. {Financiamento em até 60x|Aceitamos seu usado na troca}.",
            ],
        })),
        "collection" => Some(json!({
            "type": "collection",
            "titles": [
                "{Carros|Veículos} {collection} {à venda|em oferta} | {store}",
                "{Os melhores|Encontre} {collection} {da região|perto de você}",
            ],
            "descriptions": [
                "{Confira|Navegue por} nossa seleção de {collection}. {Preços imperdíveis|Condições especiais} e {garantia de procedência|carros revisados}.",
            ],
        })),
        "static" => Some(json!({
            "type": "static",
            "titles": [
                "{page_title} | {store}",
                "{store} - {page_title}",
            ],
            "descriptions": [
                "{Conheça|Saiba mais sobre} a {store}. {Atendimento personalizado|Tradição em seminovos} {na sua cidade|perto de você}.",
            ],
        })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_catalogs_exist() {
        for content_type in ["vehicle_detail", "collection", "static"] {
            let catalog = template_catalog(content_type).unwrap();
            assert_eq!(catalog["type"], content_type);
            assert!(catalog["titles"].as_array().unwrap().len() >= 2);
            assert!(!catalog["descriptions"].as_array().unwrap().is_empty());
        }
    }

    #[test]
    fn test_unknown_type_is_none() {
        assert!(template_catalog("blog_post").is_none());
        assert!(template_catalog("podcast").is_none());
    }
}
