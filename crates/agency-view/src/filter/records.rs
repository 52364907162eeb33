//! Filters for projects, documents, meetings and calendar events

use super::{search_matches, Criterion, DateRange, Filter, FilterContext};
use agency_model::{CalendarEvent, Document, EventKind, FileCategory, Meeting, MeetingStatus, Priority, Project, ProjectStatus};
use indexmap::IndexSet;

/// Project list filter
///
/// Status and priority are sets; an empty set is inactive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectFilter {
    /// Admitted statuses
    pub statuses: IndexSet<ProjectStatus>,
    /// Admitted priorities
    pub priorities: IndexSet<Priority>,
    /// Exact client name
    pub client: Criterion<String>,
    /// Inclusive due-date range
    pub due_range: DateRange,
    /// Substring of name or client
    pub search: Option<String>,
}

impl ProjectFilter {
    /// Create filter matching everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit this status (repeatable)
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    /// Admit this priority (repeatable)
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priorities.insert(priority);
        self
    }

    /// Only this client
    #[inline]
    #[must_use]
    pub fn for_client(mut self, client: impl Into<String>) -> Self {
        self.client = Criterion::Only(client.into());
        self
    }

    /// Due date range
    #[inline]
    #[must_use]
    pub fn within(mut self, range: DateRange) -> Self {
        self.due_range = range;
        self
    }

    /// Search over name and client
    #[inline]
    #[must_use]
    pub fn searching(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }
}

impl Filter<Project> for ProjectFilter {
    fn matches(&self, project: &Project, _ctx: &FilterContext) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&project.status))
            && (self.priorities.is_empty() || self.priorities.contains(&project.priority))
            && self.client.admits(&project.client.name)
            && self.due_range.admits(project.due_date)
            && search_matches(self.search.as_deref(), [project.name.as_str(), project.client.name.as_str()])
    }
}

/// File browser filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentFilter {
    /// File category
    pub category: Criterion<FileCategory>,
    /// Owning client
    pub client: Criterion<String>,
    /// Owning project
    pub project: Criterion<String>,
    /// Uploader name
    pub uploader: Criterion<String>,
    /// Substring of file name, client or project
    pub search: Option<String>,
}

impl DocumentFilter {
    /// Create filter matching everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only this category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: FileCategory) -> Self {
        self.category = Criterion::Only(category);
        self
    }

    /// Only this client
    #[inline]
    #[must_use]
    pub fn for_client(mut self, client: impl Into<String>) -> Self {
        self.client = Criterion::Only(client.into());
        self
    }

    /// Only this project
    #[inline]
    #[must_use]
    pub fn for_project(mut self, project: impl Into<String>) -> Self {
        self.project = Criterion::Only(project.into());
        self
    }

    /// Only files uploaded by `who`
    #[inline]
    #[must_use]
    pub fn uploaded_by(mut self, who: impl Into<String>) -> Self {
        self.uploader = Criterion::Only(who.into());
        self
    }

    /// Search over name, client and project
    #[inline]
    #[must_use]
    pub fn searching(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }
}

impl Filter<Document> for DocumentFilter {
    fn matches(&self, doc: &Document, _ctx: &FilterContext) -> bool {
        self.category.admits(&doc.category())
            && self.client.admits(&doc.client)
            && self.project.admits(&doc.project)
            && self.uploader.admits(&doc.uploaded_by)
            && search_matches(
                self.search.as_deref(),
                [doc.name.as_str(), doc.client.as_str(), doc.project.as_str()],
            )
    }
}

/// Meeting list filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeetingFilter {
    /// Meeting status
    pub status: Criterion<MeetingStatus>,
    /// Project discussed
    pub project: Criterion<String>,
    /// Substring of topic, counterpart or project
    pub search: Option<String>,
}

impl MeetingFilter {
    /// Create filter matching everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only this status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: MeetingStatus) -> Self {
        self.status = Criterion::Only(status);
        self
    }

    /// Only this project
    #[inline]
    #[must_use]
    pub fn for_project(mut self, project: impl Into<String>) -> Self {
        self.project = Criterion::Only(project.into());
        self
    }

    /// Search over topic, counterpart and project
    #[inline]
    #[must_use]
    pub fn searching(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }
}

impl Filter<Meeting> for MeetingFilter {
    fn matches(&self, meeting: &Meeting, _ctx: &FilterContext) -> bool {
        self.status.admits(&meeting.status)
            && self.project.admits(&meeting.project)
            && search_matches(
                self.search.as_deref(),
                [meeting.topic.as_str(), meeting.with.as_str(), meeting.project.as_str()],
            )
    }
}

/// Calendar sidebar filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventFilter {
    /// Admitted kinds; empty admits all
    pub kinds: IndexSet<EventKind>,
    /// Team member on the event (attendee or person on leave)
    pub member: Criterion<String>,
    /// Client the event belongs to
    pub client: Criterion<String>,
}

impl EventFilter {
    /// Create filter matching everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit this kind (repeatable)
    #[inline]
    #[must_use]
    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kinds.insert(kind);
        self
    }

    /// Only events involving `member`
    #[inline]
    #[must_use]
    pub fn for_member(mut self, member: impl Into<String>) -> Self {
        self.member = Criterion::Only(member.into());
        self
    }

    /// Only this client
    #[inline]
    #[must_use]
    pub fn for_client(mut self, client: impl Into<String>) -> Self {
        self.client = Criterion::Only(client.into());
        self
    }
}

impl Filter<CalendarEvent> for EventFilter {
    fn matches(&self, event: &CalendarEvent, _ctx: &FilterContext) -> bool {
        let details = &event.extended_props;
        let member_ok = match &self.member {
            Criterion::All => true,
            Criterion::Only(member) => {
                details.employee.as_ref() == Some(member) || details.attendees.contains(member)
            }
        };
        let client_ok = match &self.client {
            Criterion::All => true,
            Criterion::Only(client) => details.client.as_ref() == Some(client),
        };
        (self.kinds.is_empty() || self.kinds.contains(&details.kind)) && member_ok && client_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_model::{EventDetails, EventTime};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn ctx() -> FilterContext {
        FilterContext::new(NaiveDate::from_ymd_opt(2025, 4, 21).unwrap())
    }

    #[test]
    fn project_status_set() {
        let projects = vec![
            Project::new("p1", "Website Redesign", ProjectStatus::InProgress).for_client("Acme Corp"),
            Project::new("p2", "Mobile App", ProjectStatus::OnHold).for_client("Globex"),
            Project::new("p3", "SEO", ProjectStatus::Completed).for_client("Acme Corp"),
        ];
        let filter = ProjectFilter::new()
            .with_status(ProjectStatus::InProgress)
            .with_status(ProjectStatus::OnHold);
        assert_eq!(filter.apply(&projects, &ctx()).len(), 2);

        let acme = ProjectFilter::new().for_client("Acme Corp").searching("seo");
        let found = acme.apply(&projects, &ctx());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "p3");
    }

    #[test]
    fn document_category_uses_extension_fallback() {
        let uploaded = Utc.with_ymd_and_hms(2025, 4, 20, 9, 0, 0).unwrap();
        let docs = vec![
            Document::new("d1", "Brief.pdf", "Contract", uploaded).uploaded_by("Alice"),
            Document::new("d2", "Logo.png", "PNG", uploaded).uploaded_by("Bob"),
        ];
        let pdfs = DocumentFilter::new().with_category(FileCategory::Pdf);
        assert_eq!(pdfs.apply(&docs, &ctx())[0].id.as_str(), "d1");
        assert_eq!(DocumentFilter::new().uploaded_by("Bob").apply(&docs, &ctx()).len(), 1);
    }

    #[test]
    fn meeting_status_and_search() {
        let start = Utc.with_ymd_and_hms(2025, 4, 24, 10, 0, 0).unwrap();
        let meetings = vec![
            Meeting::new("m1", "Kickoff", start, 60).with_status(MeetingStatus::Confirmed),
            Meeting::new("m2", "Design Review", start, 45),
        ];
        assert_eq!(
            MeetingFilter::new().with_status(MeetingStatus::Pending).apply(&meetings, &ctx())[0].topic,
            "Design Review"
        );
        assert_eq!(MeetingFilter::new().searching("KICK").apply(&meetings, &ctx()).len(), 1);
    }

    #[test]
    fn event_member_matches_attendee_or_employee() {
        let day: EventTime = "2025-04-24".parse().unwrap();
        let mut meeting_details = EventDetails::of_kind(EventKind::ClientMeeting);
        meeting_details.attendees = vec!["Admin User".into()];
        meeting_details.client = Some("Client X".into());
        let mut leave_details = EventDetails::of_kind(EventKind::TimeOff);
        leave_details.employee = Some("Alice Smith".into());
        let events = vec![
            CalendarEvent::new("e1", "Kickoff", day, EventKind::ClientMeeting).with_details(meeting_details),
            CalendarEvent::new("e2", "Time Off", day, EventKind::TimeOff).with_details(leave_details),
        ];
        assert_eq!(EventFilter::new().for_member("Alice Smith").apply(&events, &ctx()).len(), 1);
        assert_eq!(EventFilter::new().for_client("Client X").apply(&events, &ctx()).len(), 1);
        assert_eq!(
            EventFilter::new().with_kind(EventKind::Milestone).apply(&events, &ctx()).len(),
            0
        );
        assert_eq!(EventFilter::new().apply(&events, &ctx()).len(), 2);
    }
}
