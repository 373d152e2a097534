//! Catalog entities. Declared in foreign-key dependency order.

use super::record::record;
use chrono::NaiveDateTime;

record! {
    /// A church, ministry or other body personalities and pastors belong to.
    Organization {
        table: "organization",
        path: "organization",
        columns: {
            name: Option<String>,
            short_name: Option<String>,
            address_line1: Option<String>,
            address_line2: Option<String>,
            city: Option<String>,
            province: Option<String>,
            postal_code: Option<String>,
            country: Option<String>,
            year_started: i32,
            affiliation: Option<String>,
            web_site: Option<String>,
            membership_size: i32,
        }
    }
}

record! {
    Personality {
        table: "personality",
        path: "personality",
        columns: {
            organization_id: Option<i32> => "organization",
            name: Option<String>,
            title: Option<String>,
            bio: Option<String>,
            picture: Option<Vec<u8>>,
        }
    }
}

record! {
    /// A bible translation, e.g. King James Version (`kjv`).
    Translation {
        table: "translation",
        path: "translation",
        columns: {
            name: Option<String>,
            history: Option<String>,
            version: Option<String>,
        }
    }
}

record! {
    /// One verse. `testament` is `OLD` or `NEW` by convention only.
    Scripture {
        table: "scripture",
        path: "scripture",
        columns: {
            translation_id: Option<i32> => "translation",
            testament: Option<String>,
            book: Option<String>,
            chapter: i32,
            verse: i32,
            text: Option<String>,
            prophecy: bool,
            jesus_speaking: bool,
        }
    }
}

record! {
    Passage {
        table: "passage",
        path: "passage",
        columns: {
            translation_id: Option<i32> => "translation",
            scripture_id: Option<i32> => "scripture",
            text: Option<String>,
        }
    }
}

record! {
    Commentary {
        table: "commentary",
        path: "commentary",
        columns: {
            personality_id: Option<i32> => "personality",
            passage_id: Option<i32> => "passage",
            text: Option<String>,
        }
    }
}

record! {
    QuestionCategory {
        table: "question_category",
        path: "questioncategory",
        columns: {
            name: Option<String>,
            date_created: Option<NaiveDateTime>,
            date_updated: Option<NaiveDateTime>,
        }
    }
}

record! {
    QuestionChoice {
        table: "question_choice",
        path: "question-choice",
        columns: {
            text: Option<String>,
            correct_answer: bool,
        }
    }
}

record! {
    /// A quiz question. `kind` is true/false, multiple choice or matching; `difficulty`
    /// and `testament` are free text.
    Question {
        table: "question",
        path: "question",
        columns: {
            category_id: Option<i32> => "question_category",
            answer_id: Option<i32> => "question_choice",
            text: Option<String>,
            #[serde(rename = "type")]
            kind as "type": Option<String>,
            testament: Option<String>,
            difficulty: Option<String>,
            since_version: f32,
            last_time_presented: Option<NaiveDateTime>,
        }
    }
}

record! {
    Category {
        table: "category",
        path: "category",
        columns: {
            question_id: Option<i32> => "question",
            name: Option<String>,
        }
    }
}

record! {
    Pastor {
        table: "pastor",
        path: "pastor",
        columns: {
            church_id: Option<i32> => "organization",
            name: Option<String>,
            bio: Option<String>,
            picture: Option<Vec<u8>>,
        }
    }
}
