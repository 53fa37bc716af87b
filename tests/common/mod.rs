// File: tests/common/mod.rs
// Shared in-memory content tree for the integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use orarium::config::Config;
use orarium::engine::OfficeEngine;
use orarium::source::MemorySource;
use std::sync::Arc;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub const COMPONENTS: &str = r#"[
    {"id":"bcp-opening-lent","title":"Opening Sentence","text":"Rend your hearts and not your garments."},
    {"id":"bcp-opening-general","text":"The Lord is in his holy temple."},
    {"id":"bcp-confession-rite2","title":"Confession of Sin","text":"Most merciful God, we confess"},
    {"id":"bcp-absolution-r2-lay","title":"Absolution","text":"Almighty God have mercy on us"},
    {"id":"bcp-absolution-r2-priest","title":"Absolution","text":"Almighty God have mercy on you"},
    {"id":"trisagion-byzantine","text":"Holy God, Holy Mighty, Holy Immortal"},
    {"id":"angelus","text":"The angel of the Lord brought tidings to Mary"},
    {"id":"bcp-invitatory-full-mp","text":{"rite1":"O Lord, open thou our lips","rite2":"Lord, open our lips"}},
    {"id":"bcp-invitatory-full-ep-noon-compline","text":"O God, make speed to save us"},
    {"id":"bcp-venite","text":"Come, let us sing to the Lord"},
    {"id":"bcp-jubilate","text":"Be joyful in the Lord, all you lands"},
    {"id":"bcp-pascha-nostrum","text":"Alleluia. Christ our Passover has been sacrificed for us"},
    {"id":"bcp-gloria-patri","text":"Glory to the Father, and to the Son"},
    {"id":"bcp-te-deum","text":"You are God: we praise you"},
    {"id":"bcp-benedictus","text":"Blessed be the Lord, the God of Israel"},
    {"id":"bcp-magnificat","text":"My soul proclaims the greatness of the Lord"},
    {"id":"bcp-nunc-dimittis","text":"Lord, you now have set your servant free"},
    {"id":"bcp-creed-apostles","title":"The Apostles' Creed","text":"I believe in God, the Father almighty"},
    {"id":"bcp-lords-prayer","text":"Our Father in heaven"},
    {"id":"bcp-suffrages-rite2","title":"Suffrages","text":"Show us your mercy, O Lord"},
    {"id":"bcp-collect-grace","text":"Lord God, almighty and everlasting Father"},
    {"id":"bcp-collect-peace","text":"O God, the source of all holy desires"},
    {"id":"bcp-opening-blessing-compline","text":"The Lord Almighty grant us a peaceful night"},
    {"id":"bcp-marian-antiphon-ordinary","text":"Hail, holy Queen"},
    {"id":"collect-lent-2","text":"O God, whose glory it is always to have mercy"},
    {"id":"collect-default-ferial","text":"Almighty God, give us grace"},
    {"id":"collect-the-transfiguration-of-our-lord","text":"O God, who on the holy mount revealed"},
    {"id":"collect-empty","text":{"coptic":"Only in another rite"}},
    {"id":"ignatian-examen","text":"Review the day in the presence of God"},
    {"id":"eastern-kyrie-pantocrator","text":"O Lord Almighty, the God of our fathers"},
    {"id":"orthodox-prayer-before-reading","text":"Illumine our hearts, O Master"},
    {"id":"coptic-theotokion","text":"Hail to you, O Mary, the fair dove"},
    {"id":"bcp-litany","text":"O God the Father, Creator of heaven and earth"},
    {"id":"bcp-general-thanksgiving","text":"Almighty God, Father of all mercies"},
    {"id":"bcp-chrysostom","text":"Almighty God, you have given us grace"}
]"#;

pub const RUBRICS: &str = r#"[
    {"id":"morning-office","officeName":"Morning Prayer","sequence":[
        "VARIABLE_OPENING","bcp-confession-[rite]","bcp-absolution-slot",
        "bcp-invitatory-full","VARIABLE_PSALM","VARIABLE_READING_OT",
        "VARIABLE_CANTICLE1","VARIABLE_READING_EPISTLE","VARIABLE_CANTICLE2",
        "bcp-creed-slot","bcp-lords-prayer","bcp-suffrages-slot",
        "VARIABLE_COLLECT","VARIABLE_WEEKDAY_COLLECT"]},
    {"id":"evening-office","officeName":"Evening Prayer","sequence":[
        "VARIABLE_OPENING","VARIABLE_ANTIPHON","bcp-invitatory-full","VARIABLE_PSALM",
        "VARIABLE_READING_OT","VARIABLE_CANTICLE1","bcp-litany",
        "bcp-general-thanksgiving","bcp-chrysostom","VARIABLE_COLLECT"]},
    {"id":"compline-office","officeName":"Compline","sequence":[
        "bcp-opening-blessing","bcp-invitatory-full","VARIABLE_PSALM","VARIABLE_COLLECT"]}
]"#;

// Lent 2026 begins on February 18, so March 1 is day 12 and March 6 is day 17.
pub const LENT: &str = r#"[
    {"day_of_season":1,"title":"Ash Wednesday","psalms_mp":"38"},
    {"date":"2026-03-01","title":"Second Sunday in Lent","collect":"collect-lent-2",
     "psalms_mp":"24, 29","psalms_ep":"8",
     "reading_ot_mp_year2":"Jeremiah 4:9, 19",
     "reading_epistle_mp_year2":"Romans 8:1-11, 31-39",
     "reading_gospel_ep_year2":"John 3:16"},
    {"date":"March 6, 2026","title":"Friday in the Second Week of Lent",
     "psalms_mp":"23","reading_ot_mp_year2":"Jeremiah 4:19",
     "antiphon_mp":"Create in me a clean heart, O God","antiphon":"Return to the Lord your God"},
    {"day_of_season":12,"title":"Offset entry for day twelve","psalms_mp":"130"}
]"#;

// Ordinary time has no seasonal opening sentence in the fixture library.
pub const ORDINARY2: &str = r#"[
    {"date":"2026-08-06","title":"The Transfiguration","collect":"collect-transfiguration"},
    {"date":"2026-08-07","title":"Friday after the Transfiguration","collect":"collect-empty"}
]"#;

pub const PSALMS: &str = r#"[
    {"id":"PSALM 8","text":{"NRSV":"8:1 O LORD, our Sovereign * how majestic is your name"}},
    {"id":"PSALM 23","text":{"NRSV":"23:1 The LORD is my shepherd * I shall not want"}},
    {"id":"PSALM 24","text":{"NRSV":"24:1 The earth is the LORD's * and all that is in it\n24:2 for he has founded it on the seas"}},
    {"id":"PSALM 29","text":{"NRSV":"29:1 Ascribe to the LORD, O heavenly beings"}},
    {"id":"PSALM 95","text":{"NRSV":"95:1 O come, let us sing to the LORD * let us make a joyful noise\n95:11 Therefore in my anger I swore"}}
]"#;

pub const JEREMIAH: &str = r#"{"chapters":[{"num":4,"verses":[
    {"num":9,"text":"On that day, says the LORD, courage shall fail"},
    {"num":10,"text":"Then I said, Ah, Lord GOD"},
    {"num":19,"text":"My anguish, my anguish! I writhe in pain"}]}]}"#;

pub const ROMANS: &str = r#"{"chapters":[{"num":8,"verses":[
    {"num":1,"text":"There is therefore now no condemnation"},
    {"num":11,"text":"If the Spirit of him who raised Jesus dwells in you"},
    {"num":12,"text":"So then, brothers and sisters, we are debtors"},
    {"num":31,"text":"What then are we to say about these things?"},
    {"num":39,"text":"nor anything else in all creation"}]}]}"#;

pub const JOHN: &str = r#"{"chapters":[{"num":3,"verses":[
    {"num":16,"text":"For God so loved the world"}]}]}"#;

pub fn content() -> Arc<MemorySource> {
    Arc::new(
        MemorySource::new()
            .with_file("components.json", COMPONENTS)
            .with_file("rubrics.json", RUBRICS)
            .with_file("season/lent.json", LENT)
            .with_file("season/ordinary2.json", ORDINARY2)
            .with_file("bible/OT/psalms.json", PSALMS)
            .with_file("bible/OT/jeremiah.json", JEREMIAH)
            .with_file("bible/NT/romans.json", ROMANS)
            .with_file("bible/NT/john.json", JOHN),
    )
}

pub async fn engine() -> (Arc<MemorySource>, OfficeEngine) {
    let source = content();
    let engine = OfficeEngine::load(source.clone(), &Config::default())
        .await
        .unwrap();
    (source, engine)
}
