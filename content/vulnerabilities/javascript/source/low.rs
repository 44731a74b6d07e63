let message = match form.phrase.as_deref() {
    None => String::new(),
    Some(phrase) => {
        let expected = format!("{:x}", md5::compute(rot13("success")));
        if phrase == "success" && form.token.as_deref() == Some(expected.as_str()) {
            "Well done!".to_string()
        } else if phrase == "success" {
            "Invalid token.".to_string()
        } else {
            "You got the phrase wrong.".to_string()
        }
    }
};

html += &format!("<p>{}</p>", message);
