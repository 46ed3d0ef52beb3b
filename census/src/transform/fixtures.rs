//! A trimmed QuickFacts export shared by the pipeline tests.

const HEADER: &str = "Fact,Fact Note,\"New York city, New York\",\"Value Note for New York city, New York\",\
\"Bronx County (Bronx Borough), New York\",\"Value Note for Bronx County (Bronx Borough), New York\",\
\"Kings County (Brooklyn Borough), New York\",\"Value Note for Kings County (Brooklyn Borough), New York\",\
\"New York County (Manhattan Borough), New York\",\"Value Note for New York County (Manhattan Borough), New York\",\
\"Queens County (Queens Borough), New York\",\"Value Note for Queens County (Queens Borough), New York\",\
\"Richmond County (Staten Island Borough), New York\",\"Value Note for Richmond County (Staten Island Borough), New York\"";

const ROWS: [(&str, [&str; 6]); 9] = [
    (
        "Population estimates, July 1, 2018,  (V2018)",
        ["8,398,748", "1,432,132", "2,582,830", "1,628,706", "2,278,906", "476,143"],
    ),
    (
        "Persons under 5 years, percent",
        ["6.5%", "7.3%", "7.3%", "5.0%", "6.2%", "5.6%"],
    ),
    (
        "Female persons, percent",
        ["52.3%", "52.8%", "52.5%", "52.5%", "51.5%", "51.3%"],
    ),
    (
        "Households with a broadband Internet subscription, percent, 2014-2018",
        ["79.5%", "72.5%", "77.0%", "84.5%", "80.0%", "83.5%"],
    ),
    (
        "Median household income (in 2018 dollars), 2014-2018",
        ["$60,762", "$38,467", "$56,015", "$82,459", "$64,509", "$82,166"],
    ),
    (
        "Women-owned firms, 2012",
        ["413,899", "60,464", "136,518", "105,000", "99,834", "S"],
    ),
    (
        "All firms, 2012",
        ["1,092,070", "148,555", "350,195", "255,000", "226,561", "X"],
    ),
    (
        "Land area in square miles, 2010",
        ["302.64", "42.10", "70.82", "22.83", "108.53", "58.37"],
    ),
    ("Value Flags", ["", "", "", "", "", ""]),
];

/// Full export text.
pub fn census_csv() -> String {
    render(None)
}

/// Export text with one fact row left out.
pub fn census_csv_without(label: &str) -> String {
    render(Some(label))
}

fn render(skip: Option<&str>) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for (label, values) in ROWS.iter().filter(|(l, _)| Some(*l) != skip) {
        out.push_str(&format!("\"{}\",", label));
        for v in values {
            out.push_str(&format!(",\"{}\",", v));
        }
        out.push('\n');
    }
    out
}
