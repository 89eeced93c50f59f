use serde::{Deserialize, Serialize};

/// A catalog product (instruments, consumables, reagents).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub manufacturer: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub datasheet_url: Option<String>,
    pub featured: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub author: Option<String>,
    pub published_at: String,
    pub tags: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServiceOffering {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub summary: Option<String>,
    pub description: String,
    pub icon: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct JobOpening {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub description: String,
    pub posted_at: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Office {
    pub id: u64,
    pub city: String,
    pub country: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_headquarters: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Faq {
    pub id: u64,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Testimonial {
    pub id: u64,
    pub quote: String,
    pub author: String,
    pub role: Option<String>,
    pub company: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Partner {
    pub id: u64,
    pub name: String,
    pub logo: Option<String>,
    pub website: Option<String>,
}

/// Corporate profile shown in footers and the about page.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
pub struct CompanyInfo {
    pub name: String,
    pub tagline: Option<String>,
    pub about: Option<String>,
    pub founded: Option<u32>,
    pub employees: Option<u32>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A sales lead from the contact form.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LeadReceipt {
    pub id: u64,
    pub status: String,
}

/// A quote request for a specific product.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub product_slug: String,
    pub quantity: Option<u32>,
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct InquiryReceipt {
    pub id: u64,
    pub status: String,
}

/// A job application, submitted as a multipart form with the resume
/// attached.
#[derive(Debug, Clone, PartialEq)]
pub struct JobApplication {
    pub job_slug: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume: ResumeFile,
}

/// Resume payload read by the caller; never touches the filesystem here.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApplicationReceipt {
    pub id: u64,
    pub status: String,
}
