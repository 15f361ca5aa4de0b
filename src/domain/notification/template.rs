// src/domain/notification/template.rs
//! Bilingual notification templates.
//!
//! Rendering replaces each `{name}` placeholder with the supplied variable of
//! the same name. Placeholders with no matching variable are left as-is.

use crate::domain::errors::{DomainError, DomainResult};
use std::{collections::BTreeMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    CourseEnrollment,
    CourseCompleted,
    ExamScheduled,
    ExamReminder,
    ExamResult,
    CertificateIssued,
    CertificateExpiring,
    ComplianceDeadline,
    SystemAnnouncement,
}

#[derive(Debug, PartialEq, Eq)]
pub struct NotificationTemplate {
    pub title_ar: &'static str,
    pub title_en: &'static str,
    pub message_ar: &'static str,
    pub message_en: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    pub title_ar: String,
    pub title_en: String,
    pub message_ar: String,
    pub message_en: String,
}

const COURSE_ENROLLMENT: NotificationTemplate = NotificationTemplate {
    title_ar: "تأكيد التسجيل في الدورة",
    title_en: "Course enrollment confirmed",
    message_ar: "تم تسجيلك في دورة {courseName}. تبدأ الدورة بتاريخ {startDate}.",
    message_en: "You have been enrolled in {courseName}. The course starts on {startDate}.",
};

const COURSE_COMPLETED: NotificationTemplate = NotificationTemplate {
    title_ar: "إتمام الدورة",
    title_en: "Course completed",
    message_ar: "تهانينا! لقد أتممت دورة {courseName} بنجاح.",
    message_en: "Congratulations! You have completed {courseName}.",
};

const EXAM_SCHEDULED: NotificationTemplate = NotificationTemplate {
    title_ar: "تمت جدولة اختبار",
    title_en: "Exam scheduled",
    message_ar: "تمت جدولة اختبار {examTitle} بتاريخ {examDate}. المدة: {duration} دقيقة.",
    message_en: "The exam {examTitle} is scheduled for {examDate}. Duration: {duration} minutes.",
};

const EXAM_REMINDER: NotificationTemplate = NotificationTemplate {
    title_ar: "تذكير بالاختبار",
    title_en: "Exam reminder",
    message_ar: "تذكير: يبدأ اختبار {examTitle} خلال {timeRemaining}.",
    message_en: "Reminder: the exam {examTitle} starts in {timeRemaining}.",
};

const EXAM_RESULT: NotificationTemplate = NotificationTemplate {
    title_ar: "نتيجة الاختبار متاحة",
    title_en: "Exam result available",
    message_ar: "نتيجتك في اختبار {examTitle} هي {score}% ({status}).",
    message_en: "Your result for {examTitle} is {score}% ({status}).",
};

const CERTIFICATE_ISSUED: NotificationTemplate = NotificationTemplate {
    title_ar: "إصدار الشهادة",
    title_en: "Certificate issued",
    message_ar: "تم إصدار شهادتك لدورة {courseName}. رقم الشهادة: {certificateNumber}.",
    message_en: "Your certificate for {courseName} has been issued. Certificate number: {certificateNumber}.",
};

const CERTIFICATE_EXPIRING: NotificationTemplate = NotificationTemplate {
    title_ar: "الشهادة على وشك الانتهاء",
    title_en: "Certificate expiring soon",
    message_ar: "تنتهي شهادتك رقم {certificateNumber} لدورة {courseName} بتاريخ {expiryDate}.",
    message_en: "Your certificate {certificateNumber} for {courseName} expires on {expiryDate}.",
};

const COMPLIANCE_DEADLINE: NotificationTemplate = NotificationTemplate {
    title_ar: "اقتراب موعد الامتثال",
    title_en: "Compliance deadline approaching",
    message_ar: "يجب إكمال التدريب الإلزامي {requirement} قبل {deadline}.",
    message_en: "Mandatory training {requirement} must be completed by {deadline}.",
};

const SYSTEM_ANNOUNCEMENT: NotificationTemplate = NotificationTemplate {
    title_ar: "{titleAr}",
    title_en: "{titleEn}",
    message_ar: "{messageAr}",
    message_en: "{messageEn}",
};

impl TemplateKind {
    pub const ALL: [TemplateKind; 9] = [
        Self::CourseEnrollment,
        Self::CourseCompleted,
        Self::ExamScheduled,
        Self::ExamReminder,
        Self::ExamResult,
        Self::CertificateIssued,
        Self::CertificateExpiring,
        Self::ComplianceDeadline,
        Self::SystemAnnouncement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CourseEnrollment => "COURSE_ENROLLMENT",
            Self::CourseCompleted => "COURSE_COMPLETED",
            Self::ExamScheduled => "EXAM_SCHEDULED",
            Self::ExamReminder => "EXAM_REMINDER",
            Self::ExamResult => "EXAM_RESULT",
            Self::CertificateIssued => "CERTIFICATE_ISSUED",
            Self::CertificateExpiring => "CERTIFICATE_EXPIRING",
            Self::ComplianceDeadline => "COMPLIANCE_DEADLINE",
            Self::SystemAnnouncement => "SYSTEM_ANNOUNCEMENT",
        }
    }

    pub fn template(&self) -> &'static NotificationTemplate {
        match self {
            Self::CourseEnrollment => &COURSE_ENROLLMENT,
            Self::CourseCompleted => &COURSE_COMPLETED,
            Self::ExamScheduled => &EXAM_SCHEDULED,
            Self::ExamReminder => &EXAM_REMINDER,
            Self::ExamResult => &EXAM_RESULT,
            Self::CertificateIssued => &CERTIFICATE_ISSUED,
            Self::CertificateExpiring => &CERTIFICATE_EXPIRING,
            Self::ComplianceDeadline => &COMPLIANCE_DEADLINE,
            Self::SystemAnnouncement => &SYSTEM_ANNOUNCEMENT,
        }
    }

    pub fn render(&self, variables: &BTreeMap<String, String>) -> RenderedContent {
        self.template().render(variables)
    }
}

impl NotificationTemplate {
    pub fn render(&self, variables: &BTreeMap<String, String>) -> RenderedContent {
        RenderedContent {
            title_ar: substitute(self.title_ar, variables),
            title_en: substitute(self.title_en, variables),
            message_ar: substitute(self.message_ar, variables),
            message_en: substitute(self.message_en, variables),
        }
    }
}

fn substitute(skeleton: &str, variables: &BTreeMap<String, String>) -> String {
    variables
        .iter()
        .fold(skeleton.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown notification template: {s}")))
    }
}
