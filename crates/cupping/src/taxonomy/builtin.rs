/// `(id, display key, color, items)` in wheel order.
pub const CATEGORIES: &[(&str, &str, &str, &[&str])] = &[
    (
        "fruity",
        "Fruité",
        "#CF3E53",
        &[
            "Citron",
            "Orange",
            "Pamplemousse",
            "Cerise",
            "Fraise",
            "Framboise",
            "Myrtille",
            "Raisin",
            "Ananas",
            "Mangue",
            "Passion",
            "Pêche",
            "Pomme verte",
            "Poire",
        ],
    ),
    (
        "floral",
        "Floral",
        "#E14684",
        &[
            "Jasmin",
            "Rose",
            "Fleur d'oranger",
            "Lavande",
            "Hibiscus",
            "Violette",
            "Camomille",
        ],
    ),
    (
        "spicy",
        "Épicé",
        "#CC3D42",
        &[
            "Cannelle",
            "Clou de girofle",
            "Muscade",
            "Poivre",
            "Cardamome",
            "Gingembre",
        ],
    ),
    (
        "nutty",
        "Chocolat / Noix",
        "#B57B4E",
        &[
            "Chocolat noir",
            "Chocolat au lait",
            "Cacao",
            "Noisette",
            "Amande",
            "Noix",
            "Cacahuète",
        ],
    ),
    (
        "sweet",
        "Caramélisé",
        "#E48833",
        &["Caramel", "Miel", "Cassonade", "Sirop d'érable", "Mélasse"],
    ),
    (
        "cereal",
        "Céréales / Pain",
        "#DDAF61",
        &[
            "Pain grillé",
            "Biscuit",
            "Céréales",
            "Malt",
            "Noisette grillée",
        ],
    ),
];

pub const COLOR_OVERRIDES: &[(&str, &str)] = &[
    // fruity
    ("Citron", "#F5E452"),
    ("Orange", "#F29635"),
    ("Pamplemousse", "#F27056"),
    ("Cerise", "#E72D37"),
    ("Fraise", "#EF474A"),
    ("Framboise", "#E52E6C"),
    ("Myrtille", "#6165A4"),
    ("Raisin", "#AEBF43"),
    ("Ananas", "#F8C739"),
    ("Mangue", "#F7941D"),
    ("Passion", "#F2CA1E"),
    ("Pêche", "#F3965E"),
    ("Pomme verte", "#64AC56"),
    ("Poire", "#C5B446"),
    // floral
    ("Jasmin", "#F8F8F3"),
    ("Rose", "#EF8CA6"),
    ("Camomille", "#F5C656"),
    ("Fleur d'oranger", "#FCE6C9"),
    ("Lavande", "#907DC1"),
    ("Hibiscus", "#D44C6A"),
    ("Violette", "#7F5C9E"),
    // spicy
    ("Poivre", "#9D3235"),
    ("Cannelle", "#C46436"),
    ("Clou de girofle", "#A26947"),
    ("Muscade", "#8C6544"),
    ("Gingembre", "#D6B563"),
    ("Cardamome", "#999C63"),
    // nutty
    ("Chocolat noir", "#462920"),
    ("Chocolat au lait", "#694231"),
    ("Cacao", "#5D3C2E"),
    ("Noisette", "#9C7349"),
    ("Amande", "#C7A482"),
    ("Noix", "#7B6652"),
    ("Cacahuète", "#D3A45C"),
    // sweet
    ("Caramel", "#D17C2D"),
    ("Miel", "#EAA63F"),
    ("Sirop d'érable", "#AD5D2D"),
    ("Mélasse", "#5E2C22"),
    ("Cassonade", "#C66940"),
    // cereal
    ("Pain grillé", "#886A4C"),
    ("Biscuit", "#E7C888"),
    ("Céréales", "#D7B066"),
    ("Malt", "#D8AF67"),
    ("Noisette grillée", "#B0885D"),
];
