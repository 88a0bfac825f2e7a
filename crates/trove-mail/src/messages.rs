//! Plain-text bodies for the two contact-flow emails.

use trove_types::models::PostStatus;

const SIGNATURE: &str = "— Trove Lost & Found";

pub fn owner_subject(post_title: &str) -> String {
    format!("New contact about: {post_title}")
}

/// Notification to the post owner: the sender's message plus their
/// contact details. A post that is already `returned` is worded as a
/// lost item, matching the listing's public framing.
pub fn owner_body(
    owner_name: &str,
    post_status: PostStatus,
    message: &str,
    sender_name: &str,
    sender_email: &str,
    sender_phone: Option<&str>,
) -> String {
    let kind = if post_status == PostStatus::Found {
        "found"
    } else {
        "lost"
    };

    let mut body = format!(
        "Hello {owner_name},\n\n\
         Someone is reaching out about your {kind} item.\n\n\
         Message: {message}\n\n\
         Contact details:\n\
         Name: {sender_name}\n\
         Email: {sender_email}\n"
    );
    if let Some(phone) = sender_phone {
        body.push_str(&format!("Phone: {phone}\n"));
    }
    body.push_str(&format!("\n{SIGNATURE}"));
    body
}

pub fn confirmation_subject(post_title: &str) -> String {
    format!("We sent your message about: {post_title}")
}

/// Confirmation to the sender that their message was forwarded.
pub fn confirmation_body(sender_name: &str, owner_name: &str, message: &str) -> String {
    format!(
        "Hi {sender_name},\n\n\
         We forwarded your message to {owner_name}.\n\n\
         Your message:\n{message}\n\n\
         {SIGNATURE}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_body_includes_phone_only_when_present() {
        let with_phone = owner_body(
            "Alice",
            PostStatus::Lost,
            "Found it!",
            "Bob",
            "b@x.com",
            Some("555-0100"),
        );
        assert!(with_phone.contains("Phone: 555-0100"));
        assert!(with_phone.contains("your lost item"));

        let without = owner_body("Alice", PostStatus::Found, "Found it!", "Bob", "b@x.com", None);
        assert!(!without.contains("Phone:"));
        assert!(without.contains("your found item"));
    }

    #[test]
    fn returned_posts_read_as_lost_items() {
        let body = owner_body("Alice", PostStatus::Returned, "hi", "Bob", "b@x.com", None);
        assert!(body.contains("your lost item"));
    }

    #[test]
    fn subjects_carry_the_post_title() {
        assert_eq!(owner_subject("Wallet"), "New contact about: Wallet");
        assert_eq!(
            confirmation_subject("Wallet"),
            "We sent your message about: Wallet"
        );
    }

    #[test]
    fn confirmation_names_the_owner_and_echoes_the_message() {
        let body = confirmation_body("Bob", "Alice", "Found it!");
        assert!(body.starts_with("Hi Bob,"));
        assert!(body.contains("We forwarded your message to Alice."));
        assert!(body.contains("Found it!"));
    }
}
